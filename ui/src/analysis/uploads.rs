//! The two input files and their picker state.

use std::sync::Arc;

/// A file picked by the user, read into memory once at selection time.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub bytes: Arc<[u8]>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self {
            name: name.into(),
            size,
            bytes: bytes.into(),
        }
    }

    pub fn mime(&self) -> &'static str {
        let lower = self.name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            "application/pdf"
        } else if lower.ends_with(".xlsx") {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        } else if lower.ends_with(".xls") {
            "application/vnd.ms-excel"
        } else if lower.ends_with(".csv") {
            "text/csv"
        } else {
            "application/octet-stream"
        }
    }
}

/// Same name, size and backing buffer; contents are never compared byte by byte.
impl PartialEq for UploadedFile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.size == other.size && Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSlot {
    Obligations,
    Contract,
}

impl FileSlot {
    /// Multipart field name expected by the analysis service.
    pub fn field_name(&self) -> &'static str {
        match self {
            FileSlot::Obligations => "obligations_file",
            FileSlot::Contract => "contract_file",
        }
    }

    /// Advisory picker filter; the service does its own validation.
    pub fn accept(&self) -> &'static str {
        match self {
            FileSlot::Obligations => ".xlsx,.xls",
            FileSlot::Contract => ".pdf",
        }
    }

    pub fn input_id(&self) -> &'static str {
        match self {
            FileSlot::Obligations => "obligations-upload",
            FileSlot::Contract => "contract-upload",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSet {
    pub obligations: Option<UploadedFile>,
    pub contract: Option<UploadedFile>,
    /// Keys the file inputs; bumping it remounts them with an empty selection.
    pub picker_generation: u32,
}

impl UploadSet {
    pub fn get(&self, slot: FileSlot) -> Option<&UploadedFile> {
        match slot {
            FileSlot::Obligations => self.obligations.as_ref(),
            FileSlot::Contract => self.contract.as_ref(),
        }
    }

    pub fn set(&mut self, slot: FileSlot, file: Option<UploadedFile>) {
        let cleared = file.is_none();
        match slot {
            FileSlot::Obligations => self.obligations = file,
            FileSlot::Contract => self.contract = file,
        }
        if cleared {
            self.picker_generation = self.picker_generation.wrapping_add(1);
        }
    }

    pub fn set_obligations_file(&mut self, file: Option<UploadedFile>) {
        self.set(FileSlot::Obligations, file);
    }

    pub fn set_contract_file(&mut self, file: Option<UploadedFile>) {
        self.set(FileSlot::Contract, file);
    }

    pub fn is_complete(&self) -> bool {
        self.obligations.is_some() && self.contract.is_some()
    }

    /// Both files, if both are present.
    pub fn pair(&self) -> Option<(UploadedFile, UploadedFile)> {
        Some((self.obligations.clone()?, self.contract.clone()?))
    }

    pub fn clear(&mut self) {
        self.obligations = None;
        self.contract = None;
        self.picker_generation = self.picker_generation.wrapping_add(1);
    }
}

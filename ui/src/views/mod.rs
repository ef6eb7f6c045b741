mod login;
pub use login::LoginView;

mod workspace;
pub use workspace::WorkspaceView;

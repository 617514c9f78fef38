//! UI Components
//!
//! Pages and shared widgets for the Taskboard views.

mod confirm_delete_dialog;
mod dashboard_page;
mod login_page;
mod notice_stack;
mod progress_bar;
mod project_detail_page;

pub use confirm_delete_dialog::ConfirmDeleteDialog;
pub use dashboard_page::DashboardPage;
pub use login_page::LoginPage;
pub use notice_stack::NoticeStack;
pub use progress_bar::ProgressBar;
pub use project_detail_page::ProjectDetailPage;

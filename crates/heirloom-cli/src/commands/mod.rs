pub mod assets;
pub mod loans;

/// Options shared by every command.
pub struct Settings {
    pub groups_path: Option<String>,
    pub full_precision: bool,
}

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    /// Free-form display color, stored as given.
    pub color: Option<String>,
}

impl Project {
    pub fn color_label(&self) -> &str {
        self.color.as_deref().unwrap_or("--")
    }
}

use tracing::warn;

use crate::router;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundPage {
    pub path: String,
}

impl NotFoundPage {
    pub fn mount(path: &str) -> Self {
        warn!(path, "no route matched");
        Self { path: path.to_string() }
    }

    pub fn message(&self) -> String {
        format!("The page \"{}\" doesn't exist or has been moved.", self.path)
    }

    pub fn home(&self) -> &'static str {
        router::DASHBOARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_the_requested_path() {
        let page = NotFoundPage::mount("/nowhere");
        assert!(page.message().contains("\"/nowhere\""));
        assert_eq!(page.home(), "/dashboard");
    }
}

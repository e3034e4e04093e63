use crate::cli::output;
use crate::utils::build_info;

pub const TITLE: &str = "Personal Finance Tracker";

pub struct Banner;

impl Banner {
    pub fn text() -> String {
        format!("{TITLE} {}", build_info::current().summary())
    }

    pub fn render() {
        output::info(Self::text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_the_application() {
        assert!(Banner::text().starts_with(TITLE));
    }
}

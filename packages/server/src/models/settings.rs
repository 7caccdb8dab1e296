/// Text fields accepted by the settings update form, with their defaults.
///
/// The form arrives as multipart because it may carry image uploads; the
/// handler collects these fields by name and leaves anything absent at its
/// default, matching a full-form submission model.
#[derive(Debug)]
pub struct SettingsForm {
    pub school_name: String,
    pub phone: String,
    pub email: String,
    pub theme_color: String,
    pub intro_title: String,
    pub intro_html: String,
    pub meta_title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub remove_logo: bool,
    pub remove_favicon: bool,
    pub remove_intro_image: bool,
    pub remove_og_image: bool,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            school_name: String::new(),
            phone: String::new(),
            email: String::new(),
            theme_color: "#2563eb".to_string(),
            intro_title: String::new(),
            intro_html: String::new(),
            meta_title: String::new(),
            meta_description: String::new(),
            meta_keywords: String::new(),
            og_title: String::new(),
            og_description: String::new(),
            remove_logo: false,
            remove_favicon: false,
            remove_intro_image: false,
            remove_og_image: false,
        }
    }
}

impl SettingsForm {
    /// Apply one text field by form name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "school_name" => self.school_name = value,
            "phone" => self.phone = value,
            "email" => self.email = value,
            "theme_color" => self.theme_color = value,
            "intro_title" => self.intro_title = value,
            "intro_html" => self.intro_html = value,
            "meta_title" => self.meta_title = value,
            "meta_description" => self.meta_description = value,
            "meta_keywords" => self.meta_keywords = value,
            "og_title" => self.og_title = value,
            "og_description" => self.og_description = value,
            "remove_logo" => self.remove_logo = value == "1",
            "remove_favicon" => self.remove_favicon = value == "1",
            "remove_intro_image" => self.remove_intro_image = value == "1",
            "remove_og_image" => self.remove_og_image = value == "1",
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_an_empty_form() {
        let form = SettingsForm::default();
        assert_eq!(form.theme_color, "#2563eb");
        assert!(!form.remove_logo);
    }

    #[test]
    fn set_field_applies_known_names_and_flags() {
        let mut form = SettingsForm::default();
        form.set_field("school_name", "Northfield Academy".into());
        form.set_field("remove_logo", "1".into());
        form.set_field("unknown", "ignored".into());

        assert_eq!(form.school_name, "Northfield Academy");
        assert!(form.remove_logo);
    }
}

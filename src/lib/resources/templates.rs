//! Module defining the predefined stamp templates.

use std::collections::HashMap;

use crate::model::{Color, FontSize, Gradient, TemplateId, TextPosition};


/// Style that a template imposes on the config when it's selected.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateDefaults {
    pub font_size: FontSize,
    pub text_color: Color,
    pub background_color: Color,
    /// Background gradient; it takes precedence over `background_color`.
    pub gradient: Option<Gradient>,
    pub text_position: TextPosition,
}

/// A predefined stamp template.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    /// Path to the thumbnail image, relative to the web root.
    pub thumbnail: String,
    pub defaults: TemplateDefaults,
}


lazy_static! {
    static ref TEMPLATES: HashMap<TemplateId, Template> = hashmap!{
        TemplateId::Classic => template(TemplateId::Classic,
            "Classic", "Blue gradient background with white text",
            Color(0xFF, 0xFF, 0xFF), Color(0x3B, 0x82, 0xF6),
            Some(Gradient::linear(135.0, vec![
                Color(0x3B, 0x82, 0xF6), Color(0x1E, 0x40, 0xAF)]))),
        TemplateId::Dark => template(TemplateId::Dark,
            "Dark Mode", "Dark background with green accent",
            Color(0x10, 0xB9, 0x81), Color(0x1F, 0x29, 0x37), None),
        TemplateId::Minimal => template(TemplateId::Minimal,
            "Minimal", "Clean white background with black text",
            Color(0x11, 0x18, 0x27), Color(0xFF, 0xFF, 0xFF), None),
        TemplateId::Vibrant => template(TemplateId::Vibrant,
            "Vibrant", "Rainbow gradient background with white text",
            Color(0xFF, 0xFF, 0xFF), Color(0xFF, 0x6B, 0x6B),
            Some(Gradient::linear(90.0, vec![
                Color(0xFF, 0x6B, 0x6B), Color(0x4E, 0xCD, 0xC4), Color(0x45, 0xB7, 0xD1)]))),
        TemplateId::Retro => template(TemplateId::Retro,
            "Retro", "Vintage purple background with yellow text",
            Color(0xFB, 0xBF, 0x24), Color(0x7C, 0x3A, 0xED), None),
    };
}

fn template(id: TemplateId, name: &'static str, description: &'static str,
            text_color: Color, background_color: Color,
            gradient: Option<Gradient>) -> Template {
    Template{
        id, name, description,
        thumbnail: format!("/templates/{}.png", id),
        defaults: TemplateDefaults{
            font_size: FontSize::Medium,
            text_color,
            background_color,
            gradient,
            text_position: TextPosition::Center,
        },
    }
}


impl TemplateId {
    /// The template definition for this identifier.
    pub fn template(&self) -> &'static Template {
        // The table covers every variant, as tested below.
        &TEMPLATES[self]
    }
}

/// All the templates, in their canonical order.
pub fn all() -> Vec<&'static Template> {
    TemplateId::ALL.iter().map(|id| id.template()).collect()
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use crate::model::{Color, GradientKind, TemplateId};
    use super::{all, TEMPLATES};

    #[test]
    fn table_is_complete() {
        assert_that!(TEMPLATES.len()).is_equal_to(TemplateId::ALL.len());
        let ids: Vec<_> = all().into_iter().map(|t| t.id).collect();
        assert_that!(ids).is_equal_to(TemplateId::ALL.to_vec());
    }

    #[test]
    fn thumbnails() {
        assert_that!(TemplateId::Retro.template().thumbnail.as_str())
            .is_equal_to("/templates/retro.png");
    }

    #[test]
    fn gradients() {
        let classic = TemplateId::Classic.template();
        let gradient = classic.defaults.gradient.as_ref().unwrap();
        assert_that!(gradient.kind).is_equal_to(GradientKind::Linear);
        assert_that!(gradient.angle).is_equal_to(Some(135.0));
        assert_that!(gradient.colors).is_equal_to(vec![
            Color(0x3B, 0x82, 0xF6), Color(0x1E, 0x40, 0xAF)]);

        assert_that!(TemplateId::Vibrant.template().defaults.gradient.as_ref()
            .map(|g| g.colors.len())).is_equal_to(Some(3));
        assert_that!(TemplateId::Dark.template().defaults.gradient.is_none()).is_true();
    }

    #[test]
    fn names() {
        assert_that!(TemplateId::Dark.template().name).is_equal_to("Dark Mode");
        assert_that!(TemplateId::Minimal.template().defaults.text_color)
            .is_equal_to(Color(0x11, 0x18, 0x27));
    }
}

/// Static site chrome content
pub const SITE_OWNER: &str = "Eduardo Guasti Ortiz";
pub const WINDOW_TITLE: &str = "Eduardo Guasti Ortiz | Portfolio";

pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        name: "LinkedIn",
        url: "https://www.linkedin.com/in/eduardo-guasti-ortiz/",
    },
    SocialLink {
        name: "GitHub",
        url: "https://github.com/AQUIDHEAD",
    },
    SocialLink {
        name: "GitLab",
        url: "https://gitlab.com/EGO1508",
    },
    SocialLink {
        name: "Email",
        url: "mailto:eguasti21@gmail.com",
    },
];

pub const COPYRIGHT_LINE: &str = "© 2025 Eduardo Guasti Ortiz";

pub const HEADER_FONT_SIZE: f32 = 26.0;
pub const NAV_BUTTON_FONT_SIZE: f32 = 14.0;
pub const FOOTER_FONT_SIZE: f32 = 14.0;
pub const COPYRIGHT_FONT_SIZE: f32 = 12.0;

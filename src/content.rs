//! Static page content: navigation, skills and projects.

use crate::reveal::{RevealConfig, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

pub const NAV_LINKS: [NavLink; 3] = [
    NavLink {
        href: "#about",
        label: "About",
    },
    NavLink {
        href: "#projects",
        label: "Projects",
    },
    NavLink {
        href: "#contact",
        label: "Contact",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillCategory {
    pub name: &'static str,
    pub skills: &'static [&'static str],
}

pub const SKILLS: [SkillCategory; 4] = [
    SkillCategory {
        name: "Frontend",
        skills: &["JavaScript", "TypeScript", "React", "Nextjs", "HTML5", "CSS3", "Tailwind CSS"],
    },
    SkillCategory {
        name: "Backend",
        skills: &[
            "Nodejs",
            "Nestjs",
            "Express",
            "MongoDB",
            "PostgreSQL",
            "REST API",
            "GraphQL",
            "Firebase",
        ],
    },
    SkillCategory {
        name: "Shopify",
        skills: &["Shopify App Development", "Theme Customization", "Shopify Admin API's"],
    },
    SkillCategory {
        name: "Other",
        skills: &["Git", "AWS", "Wordpress", "Big-Commerce"],
    },
];

/// Transition delay of a skill chip, staggered within and across categories.
pub fn skill_delay_ms(index: usize, category_index: usize) -> usize {
    index * 50 + category_index * 100
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub image: &'static str,
}

impl Project {
    pub fn image_src(&self, index: usize) -> String {
        format!(
            "./{}?height=400&width=600&text=Project+{}",
            self.image,
            index + 1
        )
    }
}

pub const PROJECTS: [Project; 5] = [
    Project {
        title: "IDB Banks Website",
        description: "A multilingual, responsive banking website featuring RTL support and optimized for performance.",
        tags: &["Nextjs", "Tailwind", "TypeScript"],
        image: "idb-mock.png",
    },
    Project {
        title: "CZ Store – eCommerce Platform",
        description: "A modern eCommerce storefront integrated seamlessly with BigCommerce APIs for dynamic product and cart management.",
        tags: &["Nextjs", "Tailwind", "TypeScript", "BigCommerce API's"],
        image: "czstore-mock.png",
    },
    Project {
        title: "Universal Product Feed",
        description: "A Shopify app that syncs product and collection data to Facebook Google via GraphQL APIs scalable backend operations.",
        tags: &["Reactjs", "Nodejs", "Shopify Admin API's"],
        image: "feed-mock.png",
    },
    Project {
        title: "Pushbot – Web Push Notification",
        description: "A full-featured Shopify app that enables merchants to create & send push notification campaigns to segmented subscriber groups.",
        tags: &["Reactjs", "Nodejs", "Shopify Admin API's"],
        image: "pushbot-mock.png",
    },
    Project {
        title: "Mailbot – Email Campaigns",
        description: "A Shopify app that enables merchants to send personalized email campaigns & automated emails to subscribers using event triggers.",
        tags: &["Reactjs", "Nodejs", "Shopify Admin API's"],
        image: "mailbot-mock.png",
    },
];

/// Project cards scale in one after another.
pub fn project_reveal(index: usize) -> RevealConfig {
    RevealConfig::new(Variant::ScaleIn)
        .with_delay(index as u32 * 100)
        .with_duration(600)
}

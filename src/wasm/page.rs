//! Page composition: static content, section reveals, background and chrome.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

use super::menu::{self, MenuBinding};
use super::render::{self, CanvasRenderer};
use super::reveal::{self, MountedReveal};
use super::theme::{self, ThemeBinding};
use crate::content::{self, NAV_LINKS, PROJECTS, SKILLS};
use crate::error::{Error, Result};

/// Everything mounted on the page. Dropping it unmounts the lot.
pub struct Page {
    reveals: Vec<MountedReveal>,
    particles: Option<CanvasRenderer>,
    menu: Option<MenuBinding>,
    theme: Option<ThemeBinding>,
}

impl Page {
    pub fn boot() -> Result<Page> {
        let window = web_sys::window().ok_or(Error::MissingCapability("window"))?;
        let document = window.document().ok_or(Error::MissingCapability("document"))?;

        let theme = theme::bind(&window, &document)?;
        for list in ["nav-links", "menu-links"] {
            render_nav(&document, list)?;
        }
        render_skills(&document)?;
        render_projects(&document)?;
        set_year(&document);

        let reveals = reveal::mount_all(&document)?;
        let particles = match document.get_element_by_id("dots") {
            Some(canvas) => {
                let canvas = canvas
                    .dyn_into::<HtmlCanvasElement>()
                    .map_err(|_| Error::MissingElement("#dots is not a canvas".to_owned()))?;
                render::start(&window, canvas)?
            }
            None => None,
        };
        let menu = menu::bind(&window, &document)?;

        log::info!("page mounted: {} reveal sections", reveals.len());
        Ok(Page {
            reveals,
            particles,
            menu,
            theme,
        })
    }

    pub fn refresh_reveals(&mut self) {
        for reveal in &mut self.reveals {
            reveal.refresh();
        }
    }

    pub fn revealed(&self) -> usize {
        self.reveals.iter().filter(|r| r.is_visible()).count()
    }

    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(MenuBinding::is_open)
    }
}

fn element(document: &Document, tag: &str, class: &str) -> Result<Element> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

fn text(document: &Document, tag: &str, class: &str, content: &str) -> Result<Element> {
    let el = element(document, tag, class)?;
    el.set_text_content(Some(content));
    Ok(el)
}

/// Fills the `<ul id=..>` with one `<li><a>` per section link.
pub fn render_nav(document: &Document, list_id: &str) -> Result<()> {
    let Some(list) = document.get_element_by_id(list_id) else {
        return Ok(());
    };
    for link in NAV_LINKS {
        let item = element(document, "li", "")?;
        let anchor = text(document, "a", "nav-link", link.label)?;
        anchor.set_attribute("href", link.href)?;
        item.append_child(&anchor)?;
        list.append_child(&item)?;
    }
    Ok(())
}

fn render_skills(document: &Document) -> Result<()> {
    let Some(container) = document.get_element_by_id("skills") else {
        return Ok(());
    };
    for (category_index, category) in SKILLS.iter().enumerate() {
        let group = element(document, "div", "space-y-3")?;
        let heading = text(document, "h4", "text-lg font-medium flex items-center", category.name)?;
        let bar = element(document, "span", "inline-block w-8 h-[2px] bg-primary mr-3")?;
        heading.prepend_with_node_1(&bar)?;
        group.append_child(&heading)?;

        let chips = element(document, "div", "flex flex-wrap gap-2")?;
        for (index, skill) in category.skills.iter().enumerate() {
            let chip = text(
                document,
                "div",
                "rounded-full bg-primary/10 px-3 py-1 text-sm text-primary transition-all duration-300 hover:bg-primary/20 hover:scale-105",
                skill,
            )?;
            if let Some(chip) = chip.dyn_ref::<HtmlElement>() {
                let delay = format!("{}ms", content::skill_delay_ms(index, category_index));
                chip.style().set_property("transition-delay", &delay)?;
                chip.style().set_property("animation-delay", &delay)?;
            }
            chips.append_child(&chip)?;
        }
        group.append_child(&chips)?;
        container.append_child(&group)?;
    }
    Ok(())
}

fn render_projects(document: &Document) -> Result<()> {
    let Some(grid) = document.get_element_by_id("project-grid") else {
        return Ok(());
    };
    for (index, project) in PROJECTS.iter().enumerate() {
        let config = content::project_reveal(index);
        let wrapper = element(document, "div", "")?;
        wrapper.set_attribute("data-reveal", "")?;
        wrapper.set_attribute("data-variant", config.variant.as_str())?;
        wrapper.set_attribute("data-delay", &config.delay_ms.to_string())?;
        wrapper.set_attribute("data-duration", &config.duration_ms.to_string())?;

        let card = element(
            document,
            "div",
            "card overflow-hidden transition-all duration-300 hover:shadow-lg hover:translate-y-[-4px]",
        )?;
        let frame = element(document, "div", "aspect-video w-full bg-muted overflow-hidden")?;
        let image = element(
            document,
            "img",
            "h-full w-full object-cover transition-transform duration-500 hover:scale-105",
        )?;
        image.set_attribute("src", &project.image_src(index))?;
        image.set_attribute("alt", project.title)?;
        image.set_attribute("width", "600")?;
        image.set_attribute("height", "400")?;
        frame.append_child(&image)?;
        card.append_child(&frame)?;

        let body = element(document, "div", "p-6")?;
        body.append_child(&text(document, "h3", "mb-2 text-xl font-bold", project.title)?)?;
        body.append_child(&text(document, "p", "mb-4 text-muted", project.description)?)?;
        let tags = element(document, "div", "flex flex-wrap gap-2")?;
        for tag in project.tags {
            tags.append_child(&text(
                document,
                "span",
                "rounded-full bg-primary/10 px-2 py-1 text-xs text-primary transition-colors duration-300 hover:bg-primary/20",
                tag,
            )?)?;
        }
        body.append_child(&tags)?;
        card.append_child(&body)?;
        wrapper.append_child(&card)?;
        grid.append_child(&wrapper)?;
    }
    Ok(())
}

fn set_year(document: &Document) {
    if let Some(year) = document.get_element_by_id("year") {
        let now = js_sys::Date::new_0();
        year.set_text_content(Some(&now.get_full_year().to_string()));
    }
}

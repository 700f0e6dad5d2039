#![forbid(unsafe_code)]

//! Service detail panel: a selector list, a cross-fading image layer and an
//! overlay card.
//!
//! All three regions are rebuilt from the catalog on every render. Every entry
//! keeps an image and a card in the document at all times; only the active
//! entry's image is opaque and only its card stays in flow. Inactive cards are
//! absolutely positioned and ignore pointer events so they never contribute
//! to the overlay's height.

use vitrine_core::markup::MarkupSource;
use vitrine_core::{ElementKey, Event};
use vitrine_render::{Frame, Node};
use vitrine_runtime::{Cmd, Model};

use crate::catalog::{SERVICES, Service};

/// Selector list.
pub const LIST: ElementKey = ElementKey::new("services-list");
/// Background image layer.
pub const VISUAL: ElementKey = ElementKey::new("services-visual");
/// Detail card container.
pub const OVERLAY: ElementKey = ElementKey::new("services-overlay");
/// Selector button role (indexed by catalog position).
pub const OPTION: &str = "service-option";

const LABEL: &str = "text-[10px] font-bold text-navy/30 uppercase tracking-[0.2em] mb-4";

const BUTTON_BASE: &str =
    "w-full group flex items-center gap-4 p-3 md:p-4 rounded-2xl transition-all duration-300 border text-left";
const BUTTON_ACTIVE: &str = "bg-navy border-navy shadow-xl shadow-navy/10";
const BUTTON_INACTIVE: &str = "bg-gray-50 border-transparent hover:border-primary/20 hover:bg-white";

const ICON_BASE: &str = "w-10 h-10 rounded-full flex items-center justify-center transition-colors flex-shrink-0";
const ICON_ACTIVE: &str = "bg-primary text-white";
const ICON_INACTIVE: &str = "bg-white text-navy/40 group-hover:text-primary shadow-sm";

const TITLE_BASE: &str = "flex-1 text-sm md:text-base font-bold tracking-tight transition-colors";
const CHEVRON_BASE: &str = "material-icons-outlined text-lg transition-all";

const IMAGE_BASE: &str = "absolute inset-0 w-full h-full object-cover transition-all duration-1000 ease-in-out";
const IMAGE_ACTIVE: &str = "opacity-100 scale-100";
const IMAGE_INACTIVE: &str = "opacity-0 scale-105";

const CARD_BASE: &str = "bg-white/85 backdrop-blur-xl p-8 rounded-[2rem] shadow-2xl border border-white/20 transition-all duration-700 transform";
const CARD_ACTIVE: &str = "opacity-100 translate-y-0 relative";
const CARD_INACTIVE: &str = "opacity-0 translate-y-8 absolute inset-0 pointer-events-none";

/// Messages for [`ServicePanel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMsg {
    /// Entry at this catalog position was clicked.
    Select(usize),
}

/// Single-selection detail panel controller.
#[derive(Debug, Clone, Default)]
pub struct ServicePanel {
    active: usize,
}

impl ServicePanel {
    /// Build from markup. Requires list, visual layer and overlay.
    pub fn from_markup(markup: &impl MarkupSource) -> Option<Self> {
        (markup.exists(LIST) && markup.exists(VISUAL) && markup.exists(OVERLAY)).then(Self::default)
    }

    /// Selected entry.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active
    }

    fn option(&self, i: u32, service: &Service) -> Node {
        let on = i as usize == self.active;
        let pick = |active: &str, inactive: &str, base: &str| {
            format!("{base} {}", if on { active } else { inactive })
        };
        Node::new("button")
            .key(ElementKey::indexed(OPTION, i))
            .class(pick(BUTTON_ACTIVE, BUTTON_INACTIVE, BUTTON_BASE))
            .child(
                Node::new("div")
                    .class(pick(ICON_ACTIVE, ICON_INACTIVE, ICON_BASE))
                    .child(Node::new("span").class("material-icons-outlined text-xl").text(service.icon)),
            )
            .child(
                Node::new("span")
                    .class(pick("text-white", "text-navy", TITLE_BASE))
                    .text(service.title),
            )
            .child(
                Node::new("span")
                    .class(pick("text-primary", "text-navy/20 group-hover:text-primary", CHEVRON_BASE))
                    .text("chevron_right"),
            )
    }

    fn image(&self, idx: usize, service: &Service) -> Node {
        let state = if idx == self.active { IMAGE_ACTIVE } else { IMAGE_INACTIVE };
        Node::new("img")
            .attr("src", service.image)
            .attr("alt", service.title)
            .class(format!("{IMAGE_BASE} {state}"))
    }

    fn card(&self, idx: usize, service: &Service) -> Node {
        let state = if idx == self.active { CARD_ACTIVE } else { CARD_INACTIVE };
        Node::new("div")
            .class(format!("{CARD_BASE} {state}"))
            .child(
                Node::new("h4")
                    .class("text-xl font-bold text-navy mb-2 tracking-tight")
                    .text(service.title),
            )
            .child(
                Node::new("p")
                    .class("text-sm font-medium text-navy/70 leading-relaxed mb-6")
                    .text(service.description),
            )
    }
}

impl Model for ServicePanel {
    type Message = ServiceMsg;

    fn on_event(&self, event: &Event) -> Option<ServiceMsg> {
        match event {
            Event::Click(k) if k.is_role(OPTION) => k
                .index()
                .map(|i| i as usize)
                .filter(|i| *i < SERVICES.len())
                .map(ServiceMsg::Select),
            _ => None,
        }
    }

    fn update(&mut self, msg: ServiceMsg) -> Cmd<ServiceMsg> {
        let ServiceMsg::Select(i) = msg;
        vitrine_core::debug!(service = i, "service selected");
        self.active = i;
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        let mut list = vec![Node::new("p").class(LABEL)];
        list.extend((0u32..).zip(&SERVICES).map(|(i, s)| self.option(i, s)));
        frame.replace_children(LIST, list);

        let images = SERVICES.iter().enumerate().map(|(i, s)| self.image(i, s)).collect();
        frame.replace_children_of_tag(VISUAL, "img", images);

        let cards = SERVICES.iter().enumerate().map(|(i, s)| self.card(i, s)).collect();
        frame.replace_children(OVERLAY, cards);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitrine_core::markup::StaticMarkup;
    use vitrine_render::VirtualPage;
    use vitrine_runtime::ProgramSimulator;

    fn sim() -> ProgramSimulator<ServicePanel> {
        let markup = StaticMarkup::new().with(LIST).with(VISUAL).with(OVERLAY);
        let mut page = VirtualPage::new().with(LIST, &[]).with(OVERLAY, &[]);
        page.declare_children(
            VISUAL,
            vec![
                Node::new("img").attr("src", "placeholder.jpg"),
                Node::new("div").class("absolute inset-0 bg-gradient-to-t"),
            ],
        );
        let mut sim = ProgramSimulator::new(ServicePanel::from_markup(&markup).unwrap(), page);
        sim.init();
        sim
    }

    fn in_flow_cards(sim: &ProgramSimulator<ServicePanel>) -> Vec<usize> {
        sim.page()
            .children(OVERLAY)
            .iter()
            .enumerate()
            .filter(|(_, card)| card.has_class("relative") && !card.has_class("absolute"))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn requires_all_three_regions() {
        let markup = StaticMarkup::new().with(LIST).with(VISUAL);
        assert!(ServicePanel::from_markup(&markup).is_none());
    }

    #[test]
    fn list_starts_with_empty_caption() {
        let sim = sim();
        let list = sim.page().children(LIST);
        assert_eq!(list.len(), SERVICES.len() + 1);
        assert_eq!(list[0].tag_name(), "p");
        assert_eq!(list[0].deep_text(), "");
        assert_eq!(list[1].key_of(), Some(ElementKey::indexed(OPTION, 0)));
        assert!(list[1].has_class("bg-navy"));
        assert!(list[2].has_class("bg-gray-50"));
        assert_eq!(
            list[1].deep_text(),
            format!("{}{}chevron_right", SERVICES[0].icon, SERVICES[0].title)
        );
    }

    #[test]
    fn visual_keeps_non_image_children() {
        let sim = sim();
        let visual = sim.page().children(VISUAL);
        assert_eq!(visual.len(), 1 + SERVICES.len());
        assert_eq!(visual[0].tag_name(), "div");
        let images: Vec<&Node> = visual.iter().filter(|n| n.tag_name() == "img").collect();
        assert_eq!(images.len(), SERVICES.len());
        assert_eq!(images[0].get_attr("alt"), Some(SERVICES[0].title));
        assert!(images[0].has_class("opacity-100"));
        assert!(images[1].has_class("scale-105"));
    }

    #[test]
    fn selection_moves_every_region() {
        let mut sim = sim();
        sim.inject(Event::Click(ElementKey::indexed(OPTION, 3)));
        assert_eq!(sim.model().active(), 3);
        assert_eq!(in_flow_cards(&sim), vec![3]);
        let list = sim.page().children(LIST);
        assert!(list[4].has_class("shadow-xl"));
        assert!(list[1].has_class("border-transparent"));
        let images: Vec<&Node> = sim
            .page()
            .children(VISUAL)
            .iter()
            .filter(|n| n.tag_name() == "img")
            .collect();
        assert!(images[3].has_class("scale-100"));
        assert!(images[0].has_class("opacity-0"));
    }

    #[test]
    fn exactly_one_card_in_flow() {
        let sim = sim();
        assert_eq!(in_flow_cards(&sim), vec![0]);
        let cards = sim.page().children(OVERLAY);
        assert!(cards[1].has_class("pointer-events-none"));
        assert_eq!(cards[2].children()[0].text_content(), Some(SERVICES[2].title));
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let sim = sim();
        assert_eq!(sim.model().on_event(&Event::Click(ElementKey::indexed(OPTION, 5))), None);
    }
}

#![forbid(unsafe_code)]

//! Browser adapter: live-document markup source and backend, event binding
//! and the `requestAnimationFrame` pump.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use js_sys::{Array, Function, Reflect};
use vitrine_core::markup::MarkupSource;
use vitrine_core::{ElementKey, Event, ScrollMetrics};
use vitrine_render::frame::Patch;
use vitrine_render::{Node, Presenter};
use vitrine_runtime::Backend;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

use crate::config::{PageConfig, Scope, Selectors};
use crate::error::WebError;
use crate::page::Page;

/// Attribute carrying the key of nodes built by controllers.
const KEY_ATTR: &str = "data-vk";

type EventQueue = Rc<RefCell<VecDeque<Event>>>;

fn js_err(err: JsValue) -> WebError {
    WebError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

/// Resolves element keys against the live document.
#[derive(Clone)]
struct Resolver {
    document: Document,
    selectors: Rc<Selectors>,
}

impl Resolver {
    fn resolve(&self, key: ElementKey) -> Option<Element> {
        self.resolve_role(key.role(), key.index())
    }

    fn resolve_role(&self, role: &str, index: Option<u32>) -> Option<Element> {
        let tag = match index {
            Some(i) => format!("{role}:{i}"),
            None => role.to_owned(),
        };
        if let Ok(Some(el)) = self.document.query_selector(&format!("[{KEY_ATTR}=\"{tag}\"]")) {
            return Some(el);
        }
        let sel = self.selectors.get(role)?;
        match (&sel.scope, index) {
            (Scope::Document, None) => self.document.query_selector(&sel.css).ok().flatten(),
            (Scope::All, Some(i)) => self
                .document
                .query_selector_all(&sel.css)
                .ok()?
                .item(i)?
                .dyn_into::<Element>()
                .ok(),
            (Scope::Within(parent), index) => self
                .resolve_role(parent, index)?
                .query_selector(&sel.css)
                .ok()
                .flatten(),
            _ => None,
        }
    }

    fn is_repeated(&self, role: &str) -> bool {
        match self.selectors.get(role).map(|s| &s.scope) {
            Some(Scope::All) => true,
            Some(Scope::Within(parent)) => self.is_repeated(parent),
            _ => false,
        }
    }

    fn count(&self, role: &str) -> u32 {
        let Some(sel) = self.selectors.get(role) else {
            return 0;
        };
        match &sel.scope {
            Scope::All => self
                .document
                .query_selector_all(&sel.css)
                .map(|l| l.length())
                .unwrap_or(0),
            Scope::Within(parent) if self.is_repeated(parent) => self.count(parent),
            _ => 0,
        }
    }

    /// Every statically addressable element, for routing DOM events back to
    /// keys. Built once per page start.
    fn registry(&self) -> Vec<(Element, ElementKey)> {
        let mut out = Vec::new();
        for (role, _) in self.selectors.iter() {
            // Keys carry `&'static str` roles; the configured set is small and
            // lives as long as the page.
            let role: &'static str = Box::leak(role.to_owned().into_boxed_str());
            if self.is_repeated(role) {
                for i in 0..self.count(role) {
                    let key = ElementKey::indexed(role, i);
                    if let Some(el) = self.resolve(key) {
                        out.push((el, key));
                    }
                }
            } else if let Some(el) = self.resolve(ElementKey::new(role)) {
                out.push((el, ElementKey::new(role)));
            }
        }
        out
    }
}

impl MarkupSource for Resolver {
    fn exists(&self, key: ElementKey) -> bool {
        self.resolve(key).is_some()
    }

    fn count(&self, role: &'static str) -> u32 {
        Resolver::count(self, role)
    }

    fn data(&self, key: ElementKey, name: &str) -> Option<String> {
        self.resolve(key)?.get_attribute(&format!("data-{name}"))
    }
}

struct Observation {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

/// Backend over the live document.
struct DomBackend {
    window: Window,
    resolver: Resolver,
    queue: EventQueue,
    observations: BTreeMap<ElementKey, Observation>,
}

impl DomBackend {
    fn build(&self, node: &Node) -> Result<Element, WebError> {
        let el = self
            .resolver
            .document
            .create_element(node.tag_name())
            .map_err(js_err)?;
        if !node.class_name().is_empty() {
            el.set_class_name(node.class_name());
        }
        for (name, value) in node.attrs() {
            el.set_attribute(name, value).map_err(js_err)?;
        }
        if let Some(key) = node.key_of() {
            el.set_attribute(KEY_ATTR, &key.to_string()).map_err(js_err)?;
        }
        if let Some(text) = node.text_content() {
            el.set_text_content(Some(text));
        }
        for child in node.children() {
            el.append_child(&self.build(child)?).map_err(js_err)?;
        }
        Ok(el)
    }
}

impl Presenter for DomBackend {
    type Error = WebError;

    fn apply(&mut self, patch: &Patch) -> Result<(), WebError> {
        let Some(el) = self.resolver.resolve(patch.target()) else {
            return Ok(());
        };
        match patch {
            Patch::Classes { add, remove, .. } => {
                let list = el.class_list();
                for class in remove {
                    list.remove_1(class).map_err(js_err)?;
                }
                for class in add {
                    list.add_1(class).map_err(js_err)?;
                }
            }
            Patch::Text { text, .. } => el.set_text_content(Some(text)),
            Patch::Attr { name, value, .. } => match value {
                Some(v) => el.set_attribute(name, v).map_err(js_err)?,
                None => el.remove_attribute(name).map_err(js_err)?,
            },
            Patch::Style {
                property, value, ..
            } => {
                if let Some(html) = el.dyn_ref::<HtmlElement>() {
                    html.style().set_property(property, value).map_err(js_err)?;
                }
            }
            Patch::Children {
                only_tag, nodes, ..
            } => {
                match only_tag {
                    Some(tag) => {
                        let doomed = el.query_selector_all(&format!(":scope > {tag}")).map_err(js_err)?;
                        for i in 0..doomed.length() {
                            if let Some(child) = doomed.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                                child.remove();
                            }
                        }
                    }
                    None => el.set_inner_html(""),
                }
                for node in nodes {
                    el.append_child(&self.build(node)?).map_err(js_err)?;
                }
            }
        }
        Ok(())
    }
}

impl Backend for DomBackend {
    fn measure(&self, target: ElementKey) -> Option<ScrollMetrics> {
        if target == ElementKey::WINDOW {
            return self.window.scroll_y().ok().map(ScrollMetrics::vertical);
        }
        let el = self.resolver.resolve(target)?;
        Some(ScrollMetrics {
            scroll_top: f64::from(el.scroll_top()),
            scroll_left: f64::from(el.scroll_left()),
            scroll_width: f64::from(el.scroll_width()),
            client_width: f64::from(el.client_width()),
        })
    }

    fn scroll_by(&mut self, target: ElementKey, dx: f64, smooth: bool) -> Result<(), WebError> {
        let Some(el) = self.resolver.resolve(target) else {
            return Ok(());
        };
        let opts = ScrollToOptions::new();
        opts.set_left(dx);
        opts.set_behavior(if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        });
        el.scroll_by_with_scroll_to_options(&opts);
        Ok(())
    }

    fn observe(&mut self, target: ElementKey, threshold: f64) -> Result<bool, WebError> {
        let supported = Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
        let Some(el) = self.resolver.resolve(target).filter(|_| supported) else {
            return Ok(false);
        };
        let queue = Rc::clone(&self.queue);
        let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    queue.borrow_mut().push_back(Event::Intersection {
                        target,
                        ratio: entry.intersection_ratio(),
                        intersecting: entry.is_intersecting(),
                    });
                }
            }
        });
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).map_err(js_err)?;
        observer.observe(&el);
        self.observations.insert(
            target,
            Observation {
                observer,
                _callback: callback,
            },
        );
        Ok(true)
    }

    fn unobserve(&mut self, target: ElementKey) {
        if let Some(obs) = self.observations.remove(&target) {
            obs.observer.disconnect();
        }
    }
}

/// Nearest keyed element at or above `start`.
fn keyed_path(start: Option<Element>, registry: &[(Element, ElementKey)]) -> Vec<ElementKey> {
    let mut path = Vec::new();
    let mut cursor = start;
    while let Some(el) = cursor {
        if let Some(key) = el.get_attribute(KEY_ATTR).and_then(|k| parse_key(&k)) {
            path.push(key);
        } else if let Some((_, key)) = registry.iter().find(|(r, _)| r.is_same_node(Some(&el))) {
            path.push(*key);
        }
        cursor = el.parent_element();
    }
    path
}

/// Keys written by [`DomBackend::build`] are `role` or `role:index`; only
/// roles of controller-built nodes are recognized.
fn parse_key(raw: &str) -> Option<ElementKey> {
    const BUILT: [&str; 2] = [vitrine_widgets::showcase::TAB, vitrine_widgets::service_panel::OPTION];
    let (role, index) = match raw.split_once(':') {
        Some((r, i)) => (r, Some(i.parse().ok()?)),
        None => (raw, None),
    };
    let role = BUILT.into_iter().find(|r| *r == role)?;
    Some(match index {
        Some(i) => ElementKey::indexed(role, i),
        None => ElementKey::new(role),
    })
}

fn target_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

struct Inner {
    page: Page<DomBackend>,
    queue: EventQueue,
    origin_ms: f64,
}

impl Inner {
    fn pump(&mut self, now_ms: f64) {
        let events: Vec<Event> = self.queue.borrow_mut().drain(..).collect();
        for event in events {
            self.page.push_event(event);
        }
        let elapsed = (now_ms - self.origin_ms).max(0.0);
        self.page.set_time(Duration::from_secs_f64(elapsed / 1000.0));
        let step = self.page.step();
        if step.failed > 0 {
            web_sys::console::warn_1(&JsValue::from_str(&format!("{} controller(s) failed this frame", step.failed)));
        }
    }
}

/// All page controllers bound to the current document.
#[wasm_bindgen]
pub struct VitrinePage {
    inner: Rc<RefCell<Inner>>,
    listeners: Vec<(web_sys::EventTarget, &'static str, Closure<dyn FnMut(web_sys::Event)>)>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

#[wasm_bindgen]
impl VitrinePage {
    /// Mount every controller the document supports. `config` is an optional
    /// JSON override of the default selectors and timings.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<VitrinePage, JsValue> {
        Self::mount(config.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Bind DOM listeners, run the first render and start the frame pump.
    pub fn start(&mut self) -> Result<(), JsValue> {
        self.bind().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Names of the mounted controllers.
    pub fn controllers(&self) -> Vec<JsValue> {
        self.inner
            .borrow()
            .page
            .controllers()
            .into_iter()
            .map(JsValue::from_str)
            .collect()
    }

    /// Remove listeners and stop the frame pump.
    pub fn destroy(&mut self) {
        for (target, kind, closure) in self.listeners.drain(..) {
            let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        self.frame.borrow_mut().take();
    }
}

impl VitrinePage {
    fn mount(config: Option<&str>) -> Result<Self, WebError> {
        let config = match config {
            Some(json) => PageConfig::from_json(json)?,
            None => PageConfig::default(),
        };
        let window = web_sys::window().ok_or(WebError::MissingWindow)?;
        let document = window.document().ok_or(WebError::MissingDocument)?;
        let origin_ms = window.performance().map_or(0.0, |p| p.now());
        let resolver = Resolver {
            document,
            selectors: Rc::new(config.selectors.clone()),
        };
        let queue: EventQueue = Rc::default();
        let backend = DomBackend {
            window,
            resolver: resolver.clone(),
            queue: Rc::clone(&queue),
            observations: BTreeMap::new(),
        };
        let page = Page::new(&resolver, &config, backend);
        Ok(Self {
            inner: Rc::new(RefCell::new(Inner {
                page,
                queue,
                origin_ms,
            })),
            listeners: Vec::new(),
            frame: Rc::default(),
        })
    }

    fn listen(
        &mut self,
        target: &web_sys::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<(), WebError> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        self.listeners.push((target.clone(), kind, closure));
        Ok(())
    }

    fn bind(&mut self) -> Result<(), WebError> {
        let (window, resolver, queue) = {
            let inner = self.inner.borrow();
            let backend = inner.page.backend();
            (backend.window.clone(), backend.resolver.clone(), Rc::clone(&inner.queue))
        };
        let registry = Rc::new(resolver.registry());

        let q = Rc::clone(&queue);
        let w = window.clone();
        self.listen(&window, "scroll", move |_| {
            let y = w.scroll_y().unwrap_or(0.0);
            q.borrow_mut().push_back(Event::Scroll {
                target: ElementKey::WINDOW,
                metrics: ScrollMetrics::vertical(y),
            });
        })?;

        let q = Rc::clone(&queue);
        let w = window.clone();
        self.listen(&window, "resize", move |_| {
            let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
            q.borrow_mut().push_back(Event::Resize {
                width: dim(w.inner_width()),
                height: dim(w.inner_height()),
            });
        })?;

        let document: web_sys::EventTarget = resolver.document.clone().into();
        let (q, reg) = (Rc::clone(&queue), Rc::clone(&registry));
        self.listen(&document, "click", move |ev| {
            if let Some(&key) = keyed_path(target_element(&ev), &reg).first() {
                q.borrow_mut().push_back(Event::Click(key));
            }
        })?;

        let (q, reg) = (Rc::clone(&queue), Rc::clone(&registry));
        self.listen(&document, "mousedown", move |ev| {
            let path = keyed_path(target_element(&ev), &reg);
            q.borrow_mut().push_back(Event::PointerDown { path });
        })?;

        for (el, key) in registry.iter().filter(|(_, k)| k.index().is_none()) {
            let key = *key;
            let target: web_sys::EventTarget = el.clone().into();
            let bindings: [(&'static str, fn(ElementKey) -> Event); 4] = [
                ("mouseenter", Event::PointerEnter),
                ("mouseleave", Event::PointerLeave),
                ("focusin", Event::FocusIn),
                ("focusout", Event::FocusOut),
            ];
            for (kind, make) in bindings {
                let q = Rc::clone(&queue);
                self.listen(&target, kind, move |_| q.borrow_mut().push_back(make(key)))?;
            }
            let q = Rc::clone(&queue);
            let scroller = el.clone();
            self.listen(&target, "scroll", move |_| {
                q.borrow_mut().push_back(Event::Scroll {
                    target: key,
                    metrics: ScrollMetrics {
                        scroll_top: f64::from(scroller.scroll_top()),
                        scroll_left: f64::from(scroller.scroll_left()),
                        scroll_width: f64::from(scroller.scroll_width()),
                        client_width: f64::from(scroller.client_width()),
                    },
                });
            })?;
        }

        self.inner.borrow_mut().page.init();
        self.schedule_frames(window)
    }

    fn schedule_frames(&mut self, window: Window) -> Result<(), WebError> {
        let inner = Rc::clone(&self.inner);
        let slot = Rc::clone(&self.frame);
        let w = window.clone();
        *self.frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
            inner.borrow_mut().pump(now_ms);
            if let Some(cb) = slot.borrow().as_ref() {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref::<Function>());
            }
        }));
        if let Some(cb) = self.frame.borrow().as_ref() {
            window
                .request_animation_frame(cb.as_ref().unchecked_ref::<Function>())
                .map_err(js_err)?;
        }
        Ok(())
    }
}

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::{Array, Date, Function, Object, Reflect};
use web_sys::{
    AddEventListenerOptions, Animation, Document, Element, Event, EventTarget, HtmlElement,
    KeyboardEvent, TouchEvent, WheelEvent, Window,
};

use crate::config::{SnapConfig, CONFIG_ATTRIBUTE};
use super::controller::{FrameOutcome, SnapController, Verdict, Viewport};
use super::error::SnapError;
use super::geometry::{resolve_following, LayoutProbe, SectionGeometry};
use super::intent::{DeltaMode, InputEvent, KeyPress};
use super::player::{ElementStyle, FrameStyles, TransitionPlan};

// Tried in order; an explicitly marked hero wins over class-based guesses.
const HERO_SELECTORS: [&str; 2] = [
    "[data-parallax-hero]",
    "section.hero.title-band, section.hero, header.masthead, section.banner, .hero.title-band, .hero, .masthead, .banner",
];
const BOUND_ATTRIBUTE: &str = "data-hero-snap-bound";
const TRANSIENT_PROPERTIES: [&str; 3] = ["transform", "opacity", "will-change"];
const PIN_PROPERTIES: [&str; 5] = ["position", "top", "left", "right", "overflow-y"];

fn find_hero(document: &Document) -> Option<HtmlElement> {
    HERO_SELECTORS
        .iter()
        .find_map(|selector| document.query_selector(selector).ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn find_second(hero: &Element) -> Option<HtmlElement> {
    resolve_following(
        hero,
        |el: &Element| el.next_element_sibling(),
        |el: &Element| el.tag_name().eq_ignore_ascii_case("section"),
    )
    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn now(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or_else(Date::now)
}

fn is_editable(target: Option<EventTarget>) -> bool {
    let Some(el) = target.and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
        return false;
    };
    let tag = el.tag_name().to_ascii_lowercase();
    matches!(tag.as_str(), "input" | "textarea" | "select") || el.is_content_editable()
}

fn set_styles(el: &HtmlElement, properties: &[(&str, &str)]) {
    let style = el.style();
    for (name, value) in properties {
        let _ = style.set_property(name, value);
    }
}

fn clear_styles(el: &HtmlElement, names: &[&str]) {
    let style = el.style();
    for name in names {
        let _ = style.remove_property(name);
    }
}

fn write_style(el: &HtmlElement, style: &ElementStyle) {
    set_styles(
        el,
        &[
            ("will-change", "transform, opacity"),
            ("transform", style.transform_css().as_str()),
            ("opacity", style.opacity_css().as_str()),
        ],
    );
}

fn keyframe(style: &ElementStyle, easing: Option<&str>) -> Object {
    let frame = Object::new();
    let _ = Reflect::set(&frame, &"transform".into(), &style.transform_css().into());
    let _ = Reflect::set(&frame, &"opacity".into(), &style.opacity_css().into());
    if let Some(easing) = easing {
        let _ = Reflect::set(&frame, &"easing".into(), &easing.into());
    }
    frame
}

// `Element.animate` through the JS object, as capability detection does.
fn animate(el: &HtmlElement, frames: &Object, duration_ms: f64) -> Option<Animation> {
    let animate = Reflect::get(el, &"animate".into()).ok()?.dyn_into::<Function>().ok()?;
    animate
        .call2(el, frames, &JsValue::from_f64(duration_ms))
        .ok()?
        .dyn_into::<Animation>()
        .ok()
}

pub struct DomViewport {
    window: Window,
    root: Option<HtmlElement>,
    body: HtmlElement,
    hero: HtmlElement,
    second: HtmlElement,
    locked_at: Option<f64>,
    animations: Vec<Animation>,
    native_capable: bool,
}

impl LayoutProbe for DomViewport {
    fn measure(&self) -> Option<SectionGeometry> {
        let offset = self.scroll_offset();
        let hero = self.hero.get_bounding_client_rect();
        let second = self.second.get_bounding_client_rect();
        SectionGeometry::new(hero.top() + offset, hero.height(), second.top() + offset)
    }

    fn scroll_offset(&self) -> f64 {
        self.locked_at
            .unwrap_or_else(|| self.window.scroll_y().unwrap_or(0.0))
    }
}

impl Viewport for DomViewport {
    fn lock(&mut self, at: f64) {
        let top = format!("-{}px", at);
        set_styles(
            &self.body,
            &[
                ("position", "fixed"),
                ("top", top.as_str()),
                ("left", "0"),
                ("right", "0"),
                ("overflow-y", "scroll"),
            ],
        );
        self.locked_at = Some(at);
    }

    fn apply(&mut self, styles: &FrameStyles) {
        write_style(&self.hero, &styles.hero);
        write_style(&self.second, &styles.second);
    }

    fn begin_native(&mut self, plan: &TransitionPlan) -> bool {
        if !self.native_capable {
            return false;
        }
        let start = plan.styles_at(0.0);
        let end = plan.styles_at(1.0);
        let started: Vec<Option<Animation>> = [
            (&self.hero, start.hero, end.hero),
            (&self.second, start.second, end.second),
        ]
        .into_iter()
        .map(|(el, from, to)| {
            let frames: Object = Array::of2(&keyframe(&from, Some("ease-in-out")), &keyframe(&to, None)).into();
            animate(el, &frames, plan.duration_ms)
        })
        .collect();

        if started.iter().all(Option::is_some) {
            self.animations.extend(started.into_iter().flatten());
            return true;
        }
        for animation in started.into_iter().flatten() {
            animation.cancel();
        }
        warn!("Element.animate failed, falling back to frame styles");
        self.native_capable = false;
        false
    }

    fn reset(&mut self) {
        for animation in self.animations.drain(..) {
            animation.cancel();
        }
        clear_styles(&self.hero, &TRANSIENT_PROPERTIES);
        clear_styles(&self.second, &TRANSIENT_PROPERTIES);
    }

    fn release_to(&mut self, y: f64) {
        clear_styles(&self.body, &PIN_PROPERTIES);
        self.locked_at = None;

        // a CSS `scroll-behavior: smooth` on the root would animate the jump
        let previous = self
            .root
            .as_ref()
            .and_then(|root| root.style().get_property_value("scroll-behavior").ok())
            .unwrap_or_default();
        if let Some(root) = &self.root {
            set_styles(root, &[("scroll-behavior", "auto")]);
        }
        self.window.scroll_to_with_x_and_y(0.0, y);
        if let Some(root) = &self.root {
            if previous.is_empty() {
                clear_styles(root, &["scroll-behavior"]);
            } else {
                set_styles(root, &[("scroll-behavior", previous.as_str())]);
            }
        }
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn shift_backdrop(&mut self, px: i32) {
        let position = format!("center {}px", px);
        set_styles(&self.hero, &[("background-position", position.as_str())]);
    }
}

struct Driver {
    window: Window,
    controller: RefCell<SnapController<DomViewport>>,
    frame: RefCell<Option<Closure<dyn FnMut()>>>,
    frame_id: Cell<Option<i32>>,
    deadline: RefCell<Option<Timeout>>,
}

impl Driver {
    fn now(&self) -> f64 {
        now(&self.window)
    }

    fn dispatch(self: &Rc<Self>, input: InputEvent, event: &Event) {
        let now = self.now();
        let verdict = match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.handle_input(&input, now),
            Err(_) => return,
        };
        if let Verdict::Started(plan) = verdict {
            event.prevent_default();
            self.arm_deadline(&plan);
            self.schedule_frame();
        }
    }

    fn schedule_frame(&self) {
        if self.frame_id.get().is_some() {
            return;
        }
        let frame = self.frame.borrow();
        let Some(callback) = frame.as_ref() else {
            return;
        };
        match self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.frame_id.set(Some(id)),
            // the deadline timer still lands the transition
            Err(e) => warn!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel_frame(&self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    fn run_frame(&self) {
        self.frame_id.set(None);
        let now = self.now();
        let outcome = match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.on_frame(now),
            Err(_) => FrameOutcome::Continue,
        };
        match outcome {
            FrameOutcome::Continue => self.schedule_frame(),
            FrameOutcome::Landed(_) => {
                self.deadline.borrow_mut().take();
            }
            FrameOutcome::Idle => {}
        }
    }

    fn arm_deadline(self: &Rc<Self>, plan: &TransitionPlan) {
        let driver = Rc::downgrade(self);
        let generation = plan.generation;
        let delay = (plan.deadline_at - plan.started_at).max(0.0).ceil() as u32;
        let timeout = Timeout::new(delay, move || {
            if let Some(driver) = driver.upgrade() {
                driver.expire(generation);
            }
        });
        *self.deadline.borrow_mut() = Some(timeout);
    }

    fn expire(&self, generation: u64) {
        let now = self.now();
        let landed = match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.on_deadline(generation, now).is_some(),
            Err(_) => false,
        };
        if landed {
            self.cancel_frame();
        }
    }

    fn relayout(&self) {
        self.with_controller(|controller| {
            controller.refresh();
            controller.on_scroll();
        });
    }

    fn with_controller(&self, f: impl FnOnce(&mut SnapController<DomViewport>)) {
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            f(&mut controller);
        }
    }
}

// Unregisters itself on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, SnapError> {
        Self::attach_with(target, kind, passive, false, callback)
    }

    // Capture phase sees events that do not bubble, such as an image `load`.
    fn capture(
        target: &EventTarget,
        kind: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, SnapError> {
        Self::attach_with(target, kind, true, true, callback)
    }

    fn attach_with(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        capture: bool,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, SnapError> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        options.set_capture(capture);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), kind, capture, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

// Dropping it unbinds every listener and lands any transition still in flight.
pub struct SnapHandle {
    driver: Rc<Driver>,
    hero: HtmlElement,
    listeners: Vec<Listener>,
}

impl Drop for SnapHandle {
    fn drop(&mut self) {
        self.listeners.clear();
        self.driver.cancel_frame();
        self.driver.deadline.borrow_mut().take();
        let now = self.driver.now();
        self.driver.with_controller(|controller| {
            controller.shutdown(now);
        });
        self.driver.frame.borrow_mut().take();
        let _ = self.hero.remove_attribute(BOUND_ATTRIBUTE);
    }
}

fn bind_listeners(driver: &Rc<Driver>) -> Result<Vec<Listener>, SnapError> {
    let window: &EventTarget = &driver.window;
    let mut listeners = Vec::new();

    let d = driver.clone();
    listeners.push(Listener::attach(window, "wheel", false, move |event: Event| {
        if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
            let page_height = d.controller.try_borrow().map(|c| c.viewport().viewport_height()).unwrap_or(0.0);
            let input = InputEvent::Wheel {
                delta_y: wheel.delta_y(),
                mode: DeltaMode::from_dom(wheel.delta_mode()),
                page_height,
                modified: wheel.ctrl_key() || wheel.meta_key(),
            };
            d.dispatch(input, &event);
        }
    })?);

    let d = driver.clone();
    listeners.push(Listener::attach(window, "touchstart", true, move |event: Event| {
        if let Some(y) = first_touch_y(&event) {
            d.dispatch(InputEvent::TouchStart { y }, &event);
        }
    })?);

    let d = driver.clone();
    listeners.push(Listener::attach(window, "touchmove", false, move |event: Event| {
        if let Some(y) = first_touch_y(&event) {
            d.dispatch(InputEvent::TouchMove { y }, &event);
        }
    })?);

    for kind in ["touchend", "touchcancel"] {
        let d = driver.clone();
        listeners.push(Listener::attach(window, kind, true, move |event: Event| {
            d.dispatch(InputEvent::TouchEnd, &event);
        })?);
    }

    let d = driver.clone();
    listeners.push(Listener::attach(window, "keydown", false, move |event: Event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
            let press = KeyPress {
                key: key.key(),
                shift: key.shift_key(),
                modified: key.ctrl_key() || key.alt_key() || key.meta_key(),
                editable_target: is_editable(key.target()),
            };
            d.dispatch(InputEvent::Key(press), &event);
        }
    })?);

    let d = driver.clone();
    listeners.push(Listener::attach(window, "scroll", true, move |_| {
        d.with_controller(|controller| controller.on_scroll());
    })?);

    for kind in ["resize", "orientationchange", "load"] {
        let d = driver.clone();
        listeners.push(Listener::attach(window, kind, true, move |_| d.relayout())?);
    }

    // Images and fonts usually finish after the page mounted, and a route
    // change never fires the window `load` again.
    if let Some(document) = driver.window.document() {
        let d = driver.clone();
        listeners.push(Listener::capture(&document, "load", move |_| d.relayout())?);

        let fonts = Reflect::get(&document, &"fonts".into())
            .ok()
            .and_then(|fonts| fonts.dyn_into::<EventTarget>().ok());
        if let Some(fonts) = fonts {
            let d = driver.clone();
            listeners.push(Listener::attach(&fonts, "loadingdone", true, move |_| d.relayout())?);
        }
    }

    Ok(listeners)
}

fn first_touch_y(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_y()))
}

pub fn install() -> Result<SnapHandle, SnapError> {
    let window = web_sys::window().ok_or(SnapError::NoWindow)?;
    if prefers_reduced_motion(&window) {
        return Err(SnapError::ReducedMotion);
    }
    let document = window.document().ok_or(SnapError::NoDocument)?;
    let body = document.body().ok_or(SnapError::NoBody)?;
    let hero = find_hero(&document).ok_or(SnapError::NoHero)?;
    let second = find_second(&hero).ok_or(SnapError::NoSecondSection)?;
    if hero.has_attribute(BOUND_ATTRIBUTE) {
        return Err(SnapError::AlreadyBound);
    }

    let config = SnapConfig::from_attribute(hero.get_attribute(CONFIG_ATTRIBUTE).as_deref());
    let native_capable = Reflect::has(&hero, &JsValue::from_str("animate")).unwrap_or(false);
    let viewport = DomViewport {
        window: window.clone(),
        root: document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        body,
        hero: hero.clone(),
        second,
        locked_at: None,
        animations: Vec::new(),
        native_capable,
    };
    let controller = SnapController::new(config, viewport, false);
    let active = controller.is_active();

    let driver = Rc::new(Driver {
        window,
        controller: RefCell::new(controller),
        frame: RefCell::new(None),
        frame_id: Cell::new(None),
        deadline: RefCell::new(None),
    });
    let weak = Rc::downgrade(&driver);
    *driver.frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Some(driver) = weak.upgrade() {
            driver.run_frame();
        }
    }) as Box<dyn FnMut()>));

    let listeners = bind_listeners(&driver)?;
    hero.set_attribute(BOUND_ATTRIBUTE, "")?;
    info!(
        "Hero snap bound (active: {}, native animations: {})",
        active, native_capable
    );

    Ok(SnapHandle { driver, hero, listeners })
}

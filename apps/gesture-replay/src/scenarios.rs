//! Canned pointer scripts.

use anyhow::{Context, Result};
use multitouch_core::{GestureConfig, GestureEvent};
use multitouch_testing::{GestureTestRule, Node};

pub struct Scenario {
    pub name: &'static str,
    pub about: &'static str,
    run: fn(&mut Page),
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "scroll-cancel",
        about: "touch 7 arms a scroll on #map, emits one step, then is cancelled",
        run: scroll_cancel,
    },
    Scenario {
        name: "tap",
        about: "a still touch on the zoom button",
        run: tap,
    },
    Scenario {
        name: "cancelled-tap",
        about: "a touch on the zoom button that wanders off before lifting",
        run: cancelled_tap,
    },
    Scenario {
        name: "two-fingers",
        about: "one finger pans the map while another taps the button",
        run: two_fingers,
    },
    Scenario {
        name: "mouse-drag",
        about: "a mouse drag that leaves the map and keeps scrolling",
        run: mouse_drag,
    },
];

pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|scenario| scenario.name == name)
}

/// Page layout shared by every scenario:
/// `body > div#map > span.marker` and `body > nav.toolbar > button.btn.zoom > i.icon`.
pub struct Page {
    pub rule: GestureTestRule,
    pub map: Node,
    pub marker: Node,
    pub icon: Node,
}

impl Page {
    fn new(config: GestureConfig) -> Result<Self> {
        let rule = GestureTestRule::with_config(config).context("invalid gesture config")?;
        let map = rule.append("div#map")?;
        let marker = rule.append_to(&map, "span.marker")?;
        let toolbar = rule.append("nav.toolbar")?;
        let button = rule.append_to(&toolbar, "button.btn.zoom")?;
        let icon = rule.append_to(&button, "i.icon")?;
        rule.record_scroll("#map");
        rule.record_tap(".zoom");
        Ok(Self {
            rule,
            map,
            marker,
            icon,
        })
    }
}

impl Scenario {
    pub fn run(&self, config: &GestureConfig) -> Result<Vec<GestureEvent<Node>>> {
        let mut page = Page::new(config.clone())?;
        (self.run)(&mut page);
        if !page.rule.handle().is_idle() {
            log::warn!(
                "{}: {} pointer(s) still tracked after replay",
                self.name,
                page.rule.handle().tracked_pointer_count()
            );
        }
        Ok(page.rule.take_events())
    }
}

fn scroll_cancel(page: &mut Page) {
    let map = page.map.clone();
    page.rule.touch_start(7, 100.0, 100.0, &map);
    page.rule.touch_move(7, 135.0, 100.0);
    page.rule.touch_move(7, 150.0, 100.0);
    page.rule.touch_cancel(7, 150.0, 100.0);
}

fn tap(page: &mut Page) {
    let icon = page.icon.clone();
    page.rule.touch_start(1, 40.0, 12.0, &icon);
    page.rule.touch_move(1, 44.0, 15.0);
    page.rule.touch_end(1, 44.0, 15.0);
}

fn cancelled_tap(page: &mut Page) {
    let icon = page.icon.clone();
    page.rule.touch_start(1, 40.0, 12.0, &icon);
    page.rule.touch_move(1, 40.0, 60.0);
    page.rule.touch_move(1, 40.0, 14.0);
    page.rule.touch_end(1, 40.0, 14.0);
}

fn two_fingers(page: &mut Page) {
    let marker = page.marker.clone();
    let icon = page.icon.clone();
    page.rule.touch_start(0, 200.0, 200.0, &marker);
    page.rule.touch_start(1, 40.0, 12.0, &icon);
    for step in 1..=6 {
        page.rule.touch_move(0, 200.0 + step as f32 * 10.0, 200.0);
    }
    page.rule.touch_end(1, 40.0, 12.0);
    page.rule.touch_end(0, 260.0, 200.0);
}

fn mouse_drag(page: &mut Page) {
    let map = page.map.clone();
    let body = page.rule.document().body();
    page.rule.mouse_down(10.0, 10.0, &map);
    page.rule.mouse_move(40.0, 10.0, &map);
    page.rule.mouse_move(400.0, 10.0, &body);
    page.rule.mouse_up(400.0, 10.0, &body);
}

//! Tab switching on the server settings page.
//!
//! Markup is static: every tab `name` has a button
//! `#server-setting-tab-{name}` and a panel `#server-setting-content-{name}`.
//! Exactly one button carries `active`; every other panel carries `hidden`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, MouseEvent};

use crate::constants::{TAB_CONTENT_ID_PREFIX, TAB_ID_PREFIX};
use crate::{diagnostics, dom_utils};

pub const ADMIN_TABS: [&str; 2] = ["overview", "members"];
pub const DEFAULT_TAB: &str = "overview";

pub fn tab_id(name: &str) -> String {
    format!("{}{}", TAB_ID_PREFIX, name)
}

pub fn content_id(name: &str) -> String {
    format!("{}{}", TAB_CONTENT_ID_PREFIX, name)
}

/// DOM changes needed to move from one tab to another.
#[derive(Debug, Clone, PartialEq)]
pub struct TabTransition {
    pub deactivate: Option<String>,
    pub activate: String,
}

#[derive(Debug, Default)]
pub struct TabState {
    current: Option<String>,
}

impl TabState {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn select(&mut self, name: &str) -> TabTransition {
        let previous = self.current.replace(name.to_string());
        TabTransition {
            deactivate: previous,
            activate: name.to_string(),
        }
    }
}

fn apply(document: &Document, transition: &TabTransition) -> Result<(), JsValue> {
    if let Some(previous) = &transition.deactivate {
        dom_utils::set_inactive(&dom_utils::element_by_id(document, &tab_id(previous))?)?;
        dom_utils::hide(&dom_utils::element_by_id(document, &content_id(previous))?)?;
    }
    dom_utils::set_active(&dom_utils::element_by_id(document, &tab_id(&transition.activate))?)?;
    dom_utils::show(&dom_utils::element_by_id(document, &content_id(&transition.activate))?)?;
    Ok(())
}

/// Select `name`, updating both the state and the DOM.
pub fn select_tab(document: &Document, state: &RefCell<TabState>, name: &str) -> Result<(), JsValue> {
    let transition = state.borrow_mut().select(name);
    apply(document, &transition)
}

/// Wire the tab buttons and show the default tab.
pub fn mount(document: &Document) -> Result<Rc<RefCell<TabState>>, JsValue> {
    let state = Rc::new(RefCell::new(TabState::default()));

    for name in ADMIN_TABS {
        let button = dom_utils::element_by_id(document, &tab_id(name))?;
        let state = Rc::clone(&state);
        let document = document.clone();
        let on_click = Closure::wrap(Box::new(move |_e: MouseEvent| {
            if let Err(e) = select_tab(&document, &state, name) {
                diagnostics::warn(&format!("Failed to switch to tab {}: {:?}", name, e));
            }
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    select_tab(document, &state, DEFAULT_TAB)?;
    Ok(state)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn mount_shows_overview_and_switches() {
        let document = dom_utils::document().unwrap();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(
            r#"<div id="server-setting-tab-overview"></div>
               <div id="server-setting-tab-members"></div>
               <div id="server-setting-content-overview" class="hidden"></div>
               <div id="server-setting-content-members" class="hidden"></div>"#,
        );
        document.body().unwrap().append_child(&root).unwrap();

        let state = mount(&document).unwrap();
        let overview_content = document.get_element_by_id(&content_id("overview")).unwrap();
        assert!(!overview_content.class_list().contains("hidden"));

        select_tab(&document, &state, "members").unwrap();
        assert!(overview_content.class_list().contains("hidden"));
        let members_tab = document.get_element_by_id(&tab_id("members")).unwrap();
        assert!(members_tab.class_list().contains("active"));

        root.remove();
    }
}

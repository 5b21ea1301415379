//! Invitation management on the server settings page: list, create, delete
//! and copy a registration link.
//!
//! Mutations are awaited before the list is reloaded so the reload always
//! sees the change.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlSelectElement, MouseEvent};

use super::dialog::{self, DialogOptions};
use crate::clipboard::copy_to_clipboard;
use crate::constants::{ID_INVITATION_CATEGORY, ID_INVITATION_CREATE, ID_INVITATION_LIST, LOGIN_PAGE};
use crate::models::{Invitation, InvitationCategory};
use crate::network::{FetchOutcome, Fetcher, Transport};
use crate::state::Session;
use crate::{diagnostics, dom_utils};

// ---------------------------------------------------------------------------
// API calls
// ---------------------------------------------------------------------------

pub async fn list_invitations<T: Transport>(fetcher: &Fetcher<T>) -> Option<Vec<Invitation>> {
    fetcher.fetch_core("/invitation/application", None, None).await?.into_typed()
}

pub async fn create_invitation<T: Transport>(fetcher: &Fetcher<T>, category: InvitationCategory) -> Option<FetchOutcome> {
    let path = format!("/invitation/application?category={}", category.as_str());
    fetcher.fetch_core(&path, Some("POST"), None).await
}

pub async fn delete_invitation<T: Transport>(fetcher: &Fetcher<T>, id: &str) -> bool {
    fetcher
        .fetch_core(&format!("/invitation/{}", id), Some("DELETE"), None)
        .await
        .is_some_and(|outcome| outcome.is_success())
}

/// Registration link for `invitation_id`: the current admin page URL with
/// its file name (last 11 characters) replaced by the login page.
pub fn invitation_link(page_href: &str, invitation_id: &str, core_url: &str) -> String {
    let keep = page_href.chars().count().saturating_sub(11);
    let base: String = page_href.chars().take(keep).collect();
    format!(
        "{}{}?register=&invitation={}&host={}",
        base, LOGIN_PAGE, invitation_id, core_url
    )
}

fn category_select_html() -> String {
    let options: String = InvitationCategory::ALL
        .iter()
        .map(|category| {
            let value = category.as_str();
            let label = value.to_ascii_lowercase();
            let selected = if *category == InvitationCategory::default() { " selected" } else { "" };
            format!(
                r#"<option value='{value}' data-i18n="server.invitation.category.{label}"{selected}>{label}</option>"#
            )
        })
        .collect();
    format!(
        "<form class='popup'><select id='{}'>{}</select></form>",
        ID_INVITATION_CATEGORY, options
    )
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct InvitationSettings {
    session: Rc<Session>,
    document: Document,
    /// Click handlers of the rendered items; replaced on every render.
    item_handlers: RefCell<Vec<Closure<dyn FnMut(MouseEvent)>>>,
}

impl InvitationSettings {
    pub fn new(session: Rc<Session>, document: Document) -> Rc<Self> {
        Rc::new(Self {
            session,
            document,
            item_handlers: RefCell::default(),
        })
    }

    /// Render the list, then wire the "create" button.
    pub async fn load(self: Rc<Self>) -> Result<(), JsValue> {
        self.reload().await?;
        self.attach_create_handler()
    }

    async fn reload(self: &Rc<Self>) -> Result<(), JsValue> {
        let Some(invitations) = list_invitations(self.session.fetcher()).await else {
            return Ok(());
        };
        debug_log!("Loaded {} invitations", invitations.len());
        self.render(&invitations)
    }

    fn render(self: &Rc<Self>, invitations: &[Invitation]) -> Result<(), JsValue> {
        let list = dom_utils::element_by_id(&self.document, ID_INVITATION_LIST)?;
        list.set_inner_html("");
        self.item_handlers.borrow_mut().clear();
        for invitation in invitations {
            list.append_child(&self.render_item(invitation)?.into())?;
        }
        Ok(())
    }

    fn attach_create_handler(self: &Rc<Self>) -> Result<(), JsValue> {
        let button = dom_utils::element_by_id(&self.document, ID_INVITATION_CREATE)?;
        let this = Rc::clone(self);
        let on_click = Closure::wrap(Box::new(move |_e: MouseEvent| {
            let this = Rc::clone(&this);
            spawn_local(async move {
                if let Err(e) = this.create().await {
                    diagnostics::error(&format!("Failed to create invitation: {:?}", e));
                }
            });
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        Ok(())
    }

    async fn create(self: &Rc<Self>) -> Result<(), JsValue> {
        let options = DialogOptions::new("New invitation").with_html(category_select_html());

        let read_category = Closure::wrap(Box::new(|| {
            dom_utils::document()
                .ok()
                .and_then(|d| d.get_element_by_id(ID_INVITATION_CATEGORY))
                .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
                .map(|select| JsValue::from_str(&select.value()))
                .unwrap_or_else(|| JsValue::from_str(InvitationCategory::default().as_str()))
        }) as Box<dyn FnMut() -> JsValue>);
        let result = dialog::fire(&options, Some(read_category.as_ref().unchecked_ref())).await?;
        drop(read_category);

        if result.confirmed {
            let category = result
                .value
                .as_deref()
                .and_then(InvitationCategory::parse)
                .unwrap_or_default();
            create_invitation(self.session.fetcher(), category).await;
            self.reload().await?;
        }
        Ok(())
    }

    async fn delete(self: &Rc<Self>, invitation: &Invitation) -> Result<(), JsValue> {
        let options = DialogOptions::destructive(format!("Delete invitation '{}'", invitation.id), "Delete");
        let result = dialog::fire(&options, None).await?;
        if result.confirmed {
            delete_invitation(self.session.fetcher(), &invitation.id).await;
            self.reload().await?;
        }
        Ok(())
    }

    async fn copy_link(&self, invitation_id: &str) -> Result<(), JsValue> {
        let href = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no global window exists"))?
            .location()
            .href()?;
        copy_to_clipboard(&invitation_link(&href, invitation_id, self.session.core_url())).await;
        Ok(())
    }

    fn render_item(self: &Rc<Self>, invitation: &Invitation) -> Result<Element, JsValue> {
        let item = self.document.create_element("div")?;
        item.set_id(&invitation.id);
        item.set_class_name("invitation config-item");

        let name = self.document.create_element("div")?;
        name.set_class_name("name invitation");
        name.set_text_content(Some(&invitation.label()));
        item.append_child(&name)?;

        let menu = self.document.create_element("div")?;
        menu.set_class_name("context-menu");

        let this = Rc::downgrade(self);
        let id = invitation.id.clone();
        menu.append_child(&self.context_button(
            "<revoice-icon-clipboard></revoice-icon-clipboard>",
            "Copy link",
            move || {
                let Some(this) = this.upgrade() else { return };
                let id = id.clone();
                spawn_local(async move {
                    if let Err(e) = this.copy_link(&id).await {
                        diagnostics::error(&format!("Failed to copy invitation link: {:?}", e));
                    }
                });
            },
        )?.into())?;

        let this = Rc::downgrade(self);
        let target = invitation.clone();
        menu.append_child(&self.context_button(
            "<revoice-icon-trash></revoice-icon-trash>",
            "Delete",
            move || {
                let Some(this) = this.upgrade() else { return };
                let invitation = target.clone();
                spawn_local(async move {
                    if let Err(e) = this.delete(&invitation).await {
                        diagnostics::error(&format!("Failed to delete invitation: {:?}", e));
                    }
                });
            },
        )?.into())?;

        item.append_child(&menu)?;
        Ok(item)
    }

    fn context_button<F>(&self, icon_html: &str, title: &str, on_click: F) -> Result<Element, JsValue>
    where
        F: Fn() + 'static,
    {
        let button = self.document.create_element("div")?;
        button.set_class_name("icon");
        button.set_inner_html(icon_html);
        button.set_attribute("title", title)?;

        let cb = Closure::wrap(Box::new(move |_e: MouseEvent| on_click()) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        self.item_handlers.borrow_mut().push(cb);
        Ok(button)
    }
}

//! In-page scripts
//!
//! The tree lives two frames deep (`navTableFrame` -> `navContent`), so every
//! tree script first resolves that nested document. Elements handed back to
//! Rust are stamped with a numeric attribute; the counter lives on the top
//! window so stamps stay unique when the inner frames reload.

use crate::layout::{LoginLayout, TreeLayout};
use crate::surface::NodeHandle;

/// Attribute carrying a stamped element's handle.
pub const HANDLE_ATTRIBUTE: &str = "data-ges-handle";

/// Result of the selection script
pub const SELECT_OK: &str = "ok";
pub const SELECT_STALE: &str = "stale";
pub const SELECT_HIDDEN: &str = "hidden";

/// Encode a Rust string as a JavaScript string literal.
fn js_str(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Builds the scripts evaluated by [`CdpSurface`](super::surface::CdpSurface)
#[derive(Debug, Clone)]
pub struct PageScripts {
    layout: TreeLayout,
    prelude: String,
}

impl PageScripts {
    pub fn new(layout: TreeLayout) -> Self {
        let prelude = format!(
            r#"
            const navDoc = () => {{
                const outer = document.getElementById({outer});
                const inner = outer && outer.contentWindow
                    ? outer.contentWindow.document.getElementById({inner})
                    : null;
                return inner && inner.contentWindow ? inner.contentWindow.document : null;
            }};
            const stamp = (el) => {{
                if (!el.hasAttribute({attr})) {{
                    window.__gesNextHandle = (window.__gesNextHandle || 0) + 1;
                    el.setAttribute({attr}, String(window.__gesNextHandle));
                }}
                return Number(el.getAttribute({attr}));
            }};
            const find = (doc, handle) => doc
                ? doc.querySelector('[' + {attr} + '="' + handle + '"]')
                : null;
            "#,
            outer = js_str(&layout.nav_table_frame),
            inner = js_str(&layout.nav_content_frame),
            attr = js_str(HANDLE_ATTRIBUTE),
        );
        Self { layout, prelude }
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    fn wrap(&self, body: &str) -> String {
        format!("(() => {{ {} {} }})()", self.prelude, body)
    }

    /// `true` once the nested navigation document is reachable.
    pub fn nav_frame_present(&self) -> String {
        self.wrap("return navDoc() !== null;")
    }

    /// Array of `{handle, twistySrc, kindSrc}` for every toggle in the tree.
    pub fn scan_twisties(&self) -> String {
        self.wrap(&format!(
            r#"
            const doc = navDoc();
            if (!doc) return [];
            return Array.from(doc.querySelectorAll('.' + {twisty})).map((x) => {{
                const icon = x.parentElement ? x.parentElement.querySelector({kind}) : null;
                return {{
                    handle: stamp(x),
                    twistySrc: x.getAttribute('src'),
                    kindSrc: icon ? icon.getAttribute('src') : null,
                }};
            }});
            "#,
            twisty = js_str(&self.layout.twisty_class),
            kind = js_str(&self.layout.kind_icon_selector),
        ))
    }

    /// Click a toggle; `false` if it is gone.
    pub fn expand(&self, twisty: NodeHandle) -> String {
        self.wrap(&format!(
            r#"
            const el = find(navDoc(), {handle});
            if (!el || !el.isConnected) return false;
            el.click();
            return true;
            "#,
            handle = twisty.0,
        ))
    }

    /// Handles of all content nodes in document order, or `null` without a tree.
    pub fn content_nodes(&self) -> String {
        self.wrap(&format!(
            r#"
            const doc = navDoc();
            if (!doc) return null;
            return Array.from(doc.querySelectorAll({selector})).map((el) => stamp(el));
            "#,
            selector = js_str(&self.layout.content_selector()),
        ))
    }

    /// Press and release the mouse on a content node.
    pub fn select(&self, node: NodeHandle) -> String {
        self.wrap(&format!(
            r#"
            const doc = navDoc();
            const el = find(doc, {handle});
            if (!el || !el.isConnected) return {stale};
            if (el.getClientRects().length === 0) return {hidden};
            el.scrollIntoView({{ block: 'center' }});
            const view = doc.defaultView;
            for (const type of ['mousedown', 'mouseup', 'click']) {{
                el.dispatchEvent(new view.MouseEvent(type, {{
                    bubbles: true,
                    cancelable: true,
                    view: view,
                    button: 0,
                }}));
            }}
            return {ok};
            "#,
            handle = node.0,
            stale = js_str(SELECT_STALE),
            hidden = js_str(SELECT_HIDDEN),
            ok = js_str(SELECT_OK),
        ))
    }

    /// Label text of a content node, or `null`.
    pub fn label(&self, node: NodeHandle) -> String {
        self.wrap(&format!(
            r#"
            const el = find(navDoc(), {handle});
            const text = el ? el.querySelector('.' + {text}) : null;
            return text && text.innerText ? text.innerText : null;
            "#,
            handle = node.0,
            text = js_str(&self.layout.text_class),
        ))
    }

    /// Handle of the content node found `ancestor_depth` containers up, or `null`.
    pub fn structural_parent(&self, node: NodeHandle) -> String {
        self.wrap(&format!(
            r#"
            let up = find(navDoc(), {handle});
            for (let i = 0; i < {depth} && up; i++) up = up.parentElement;
            const parent = up ? up.querySelector('.' + {content}) : null;
            return parent ? stamp(parent) : null;
            "#,
            handle = node.0,
            depth = self.layout.ancestor_depth,
            content = js_str(&self.layout.content_class),
        ))
    }

    /// Detection signals from the top-level document.
    pub fn detail_panel(&self) -> String {
        self.wrap(&format!(
            r#"
            return {{
                viewGraphics: document.querySelector({graphics}) !== null,
                errorIndicationVisible: document.querySelector({indication}) !== null,
            }};
            "#,
            graphics = js_str(&self.layout.view_graphics_selector),
            indication = js_str(&self.layout.error_indication_selector),
        ))
    }

    /// The three record categories, or `null` when the accessor is missing.
    pub fn diagnostics(&self) -> String {
        self.wrap(&format!(
            r#"
            const source = window[{global}];
            if (!source) return null;
            const list = (getter) => {{
                const value = typeof getter === 'function' ? getter.call(source) : null;
                return Array.isArray(value) ? value : [];
            }};
            return {{
                mainErrors: list(source.getMainErrors),
                actionErrors: list(source.getActionErrors),
                infoMessages: list(source.getInfoMessages),
            }};
            "#,
            global = js_str(&self.layout.diagnostics_global),
        ))
    }

    /// Fire the logout entry of the system menu; `false` if it is missing.
    pub fn logout(&self, login: &LoginLayout) -> String {
        self.wrap(&format!(
            r#"
            const frame = document.getElementById({frame});
            const entry = frame && frame.contentWindow
                ? frame.contentWindow.document.getElementById({entry})
                : null;
            if (!entry || !entry.onmouseup) return false;
            entry.onmouseup(new MouseEvent('mouseup', {{ bubbles: false }}));
            return true;
            "#,
            frame = js_str(&login.menu_frame),
            entry = js_str(&login.logout_entry),
        ))
    }
}

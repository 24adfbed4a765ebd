//! Markup assumptions about the target application
//!
//! None of these values are discovered at runtime. They describe how the
//! application renders its login form, its nested navigation frames, the
//! area tree and the detail panel, and must be checked against the
//! application's markup when it changes.

/// Selectors and markers for the rendered area tree and its surroundings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLayout {
    /// Id of the outer frame holding the navigation table
    pub nav_table_frame: String,

    /// Id of the frame, inside `nav_table_frame`, holding the tree
    pub nav_content_frame: String,

    /// Class of the expand/collapse toggle image of a tree node
    pub twisty_class: String,

    /// Substring of the toggle image source while a node is collapsed
    pub collapsed_marker: String,

    /// Selector, relative to the toggle's parent, of the node kind icon
    pub kind_icon_selector: String,

    /// Suffix of the kind icon source for area nodes
    pub area_marker: String,

    /// Class of the element carrying a node's label and click target
    pub content_class: String,

    /// Class of the label text inside a content element
    pub text_class: String,

    /// Id prefix of the tree's outer container
    pub tree_root_prefix: String,

    /// Containment steps between a content element and its parent node's
    /// container
    pub ancestor_depth: usize,

    /// Control that only exists when the selection has graphics
    pub view_graphics_selector: String,

    /// Panel shown when the selection reports errors
    pub error_indication_selector: String,

    /// Global object exposing the application's diagnostics
    pub diagnostics_global: String,
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self {
            nav_table_frame: "navTableFrame".to_string(),
            nav_content_frame: "navContent".to_string(),
            twisty_class: "TreeCtrl-twisty".to_string(),
            collapsed_marker: "/clean_collapsed.png".to_string(),
            kind_icon_selector: ".TreeCtrl-content > img.TreeCtrl-icon".to_string(),
            area_marker: "/area.gif".to_string(),
            content_class: "TreeCtrl-content".to_string(),
            text_class: "TreeCtrl-text".to_string(),
            tree_root_prefix: "geoTree".to_string(),
            ancestor_depth: 4,
            view_graphics_selector: r#"#actButtonSpan > span[title="View graphics"]"#.to_string(),
            error_indication_selector: r#"#errorIndication:not([style*="display: none"])"#
                .to_string(),
            diagnostics_global: "DisplayError".to_string(),
        }
    }
}

impl TreeLayout {
    /// Whether a toggle image source marks its node as collapsed.
    pub fn is_collapsed(&self, twisty_src: Option<&str>) -> bool {
        twisty_src.is_some_and(|src| src.contains(&self.collapsed_marker))
    }

    /// Whether a kind icon source marks its node as an area.
    pub fn is_area(&self, icon_src: Option<&str>) -> bool {
        icon_src.is_some_and(|src| src.ends_with(&self.area_marker))
    }

    /// Selector for every content element of the area tree, in document order.
    pub fn content_selector(&self) -> String {
        format!(
            ".TreeCtrl-outer[id^={}] .{}",
            self.tree_root_prefix, self.content_class
        )
    }
}

/// Selectors for the login form and the session menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginLayout {
    pub username_input: String,
    pub password_input: String,
    pub submit: String,
    pub system_menu: String,
    pub menu_frame: String,
    pub logout_entry: String,
}

impl Default for LoginLayout {
    fn default() -> Self {
        Self {
            username_input: "#nameInput".to_string(),
            password_input: "#pass".to_string(),
            submit: "#submit".to_string(),
            system_menu: r#"img[title="System Menu"]"#.to_string(),
            menu_frame: "rightMenuiframe".to_string(),
            logout_entry: "main_logout".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_marker_matches_anywhere_in_source() {
        let layout = TreeLayout::default();
        assert!(layout.is_collapsed(Some("/img/tree/clean_collapsed.png")));
        assert!(layout.is_collapsed(Some("/img/clean_collapsed.png?v=2")));
        assert!(!layout.is_collapsed(Some("/img/tree/clean_expanded.png")));
        assert!(!layout.is_collapsed(None));
    }

    #[test]
    fn test_area_marker_matches_suffix_only() {
        let layout = TreeLayout::default();
        assert!(layout.is_area(Some("/img/icons/area.gif")));
        assert!(!layout.is_area(Some("/img/icons/area.gif?v=2")));
        assert!(!layout.is_area(Some("/img/icons/device.gif")));
        assert!(!layout.is_area(None));
    }

    #[test]
    fn test_content_selector() {
        assert_eq!(
            TreeLayout::default().content_selector(),
            ".TreeCtrl-outer[id^=geoTree] .TreeCtrl-content"
        );
    }
}

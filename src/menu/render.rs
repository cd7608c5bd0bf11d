//! Logical display feed: one text line per visible entry.
//!
//! Rendering is a pure projection of the active page — it never mutates
//! menu or store state, so the display task can call it every frame.
//! Output is text-only; glyph layout and pixel drawing belong to the
//! display collaborator.

use core::fmt::Write;

use heapless::{String, Vec};

use super::entry::{EntryKind, LabelSuffix};
use super::nav::Menu;
use super::MAX_ENTRIES;

/// One rendered row of the active page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuLine {
    /// Entry label, with the profile suffix appended on heading rows.
    pub label: String<32>,
    /// Rendered value column; empty for headings, links and actions.
    pub value: String<8>,
    /// Whether this row holds the focus cursor.
    pub focused: bool,
}

/// Project the active page into display lines.
///
/// Hidden (feature-gated) entries are omitted entirely, so line indices
/// match what the operator sees, not the entry table. A closed menu
/// renders as no lines.
pub fn render_lines(menu: &Menu) -> Vec<MenuLine, MAX_ENTRIES> {
    let mut lines = Vec::new();
    let Some(page) = menu.active_page() else {
        return lines;
    };

    for (index, entry) in page.spec().entries.iter().enumerate() {
        if !entry.visible(menu.features()) {
            continue;
        }

        let mut line = MenuLine {
            focused: index == page.focus,
            ..MenuLine::default()
        };
        let _ = line.label.push_str(entry.label);

        match entry.kind {
            EntryKind::Heading(suffix) => match suffix {
                LabelSuffix::None => {}
                // Committed 1-based indices, matching the selector rows.
                LabelSuffix::TuningProfile => {
                    let _ = write!(line.label, " {}", menu.binding().tuning_index() + 1);
                }
                LabelSuffix::TuningAndRate => {
                    let _ = write!(
                        line.label,
                        " {}-{}",
                        menu.binding().tuning_index() + 1,
                        menu.binding().rate_index() + 1
                    );
                }
            },
            EntryKind::Numeric(f) => {
                let v = f.read(&page.cells);
                if f.divisor > 1 {
                    let d = f.divisor as i32;
                    let _ = write!(line.value, "{}.{}", v / d, v % d);
                } else {
                    let _ = write!(line.value, "{}", v);
                }
            }
            EntryKind::Enum(f) => {
                let _ = line.value.push_str(f.label(&page.cells));
            }
            EntryKind::SubPage(_) => {
                let _ = line.value.push_str(">");
            }
            EntryKind::Action(_) | EntryKind::Back => {}
        }

        // Capacity covers every table row; a push can only fail if a
        // page grows past MAX_ENTRIES, which the table tests reject.
        if lines.push(line).is_err() {
            break;
        }
    }
    lines
}

// ── Unit Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{ConfigStore, EventOutcome, FeatureSet, NavEvent, PageId, RamConfigStore};

    fn open_menu(features: FeatureSet) -> (RamConfigStore, Menu) {
        let mut store = RamConfigStore::default();
        let mut menu = Menu::new(&store, features);
        assert_eq!(
            menu.handle_event(&mut store, NavEvent::Toggle),
            EventOutcome::Handled
        );
        (store, menu)
    }

    fn descend(menu: &mut Menu, store: &mut RamConfigStore, label: &str, id: PageId) {
        for _ in 0..32 {
            if menu.active_page().unwrap().focused_entry().label == label {
                break;
            }
            menu.handle_event(store, NavEvent::Down);
        }
        menu.handle_event(store, NavEvent::Right);
        assert_eq!(menu.active_page().unwrap().id, id);
    }

    fn line<'a>(lines: &'a [MenuLine], label: &str) -> &'a MenuLine {
        lines
            .iter()
            .find(|l| l.label.starts_with(label))
            .unwrap_or_else(|| panic!("no line labelled {:?}", label))
    }

    #[test]
    fn closed_menu_renders_nothing() {
        let store = RamConfigStore::default();
        let menu = Menu::new(&store, FeatureSet::all());
        assert!(render_lines(&menu).is_empty());
    }

    #[test]
    fn top_page_rows_render_kinds() {
        let (_, menu) = open_menu(FeatureSet::all());
        let lines = render_lines(&menu);

        assert_eq!(line(&lines, "-- PROFILE --").value, "");
        assert_eq!(line(&lines, "TUNE PROF").value, "1");
        assert_eq!(line(&lines, "GAINS").value, ">");
        assert_eq!(line(&lines, "BACK").value, "");
    }

    #[test]
    fn focus_flag_follows_the_cursor() {
        let (mut store, mut menu) = open_menu(FeatureSet::all());

        let lines = render_lines(&menu);
        assert!(line(&lines, "TUNE PROF").focused);

        menu.handle_event(&mut store, NavEvent::Down);
        let lines = render_lines(&menu);
        assert!(!line(&lines, "TUNE PROF").focused);
        assert!(line(&lines, "GAINS").focused);

        assert_eq!(lines.iter().filter(|l| l.focused).count(), 1);
    }

    #[test]
    fn hidden_entries_are_omitted() {
        let (_, menu) = open_menu(FeatureSet::none());
        let lines = render_lines(&menu);
        assert!(lines.iter().all(|l| l.label != "COPY PROF"));

        let (_, menu) = open_menu(FeatureSet::all());
        let lines = render_lines(&menu);
        assert!(lines.iter().any(|l| l.label == "COPY PROF"));
    }

    #[test]
    fn scaled_fields_render_tenths() {
        let (mut store, mut menu) = open_menu(FeatureSet::all());
        descend(&mut menu, &mut store, "RATES", PageId::RateCurve);

        let lines = render_lines(&menu);
        // rc_rate 100 / 10 -> "10.0"; super rate 70 -> "7.0".
        assert_eq!(line(&lines, "RC R RATE").value, "10.0");
        assert_eq!(line(&lines, "ROLL SUPER").value, "7.0");
    }

    #[test]
    fn scaled_fields_render_fractional_part() {
        let mut store = RamConfigStore::default();
        store.rate_mut(0).super_rates[0] = 73; // 7.3
        let mut menu = Menu::new(&store, FeatureSet::all());
        menu.handle_event(&mut store, NavEvent::Toggle);
        descend(&mut menu, &mut store, "RATES", PageId::RateCurve);

        let lines = render_lines(&menu);
        assert_eq!(line(&lines, "ROLL SUPER").value, "7.3");
    }

    #[test]
    fn enum_fields_render_labels() {
        let (mut store, mut menu) = open_menu(FeatureSet::all());
        descend(&mut menu, &mut store, "COPY PROF", PageId::CopyProfile);

        let lines = render_lines(&menu);
        assert_eq!(line(&lines, "TUNE PROF TO").value, "-");

        menu.handle_event(&mut store, NavEvent::Right); // "-" -> "1"
        let lines = render_lines(&menu);
        assert_eq!(line(&lines, "TUNE PROF TO").value, "1");
    }

    #[test]
    fn heading_suffix_shows_committed_profiles() {
        let (mut store, mut menu) = open_menu(FeatureSet::all());

        // Select tuning profile 2 before descending.
        menu.handle_event(&mut store, NavEvent::Right);
        descend(&mut menu, &mut store, "GAINS", PageId::Gains);

        let lines = render_lines(&menu);
        assert_eq!(line(&lines, "-- GAINS --").label, "-- GAINS -- 2");
    }

    #[test]
    fn rate_heading_shows_both_profiles() {
        let (mut store, mut menu) = open_menu(FeatureSet::all());
        descend(&mut menu, &mut store, "RATES", PageId::RateCurve);

        let lines = render_lines(&menu);
        assert_eq!(line(&lines, "-- RATES --").label, "-- RATES -- 1-1");
    }

    #[test]
    fn imuf_page_renders_reboot_notice() {
        let (mut store, mut menu) = open_menu(FeatureSet::all());
        descend(&mut menu, &mut store, "IMUF", PageId::ImufFilter);

        let lines = render_lines(&menu);
        let notice = line(&lines, "-- CHANGES REQUIRE REBOOT --");
        assert_eq!(notice.label, "-- CHANGES REQUIRE REBOOT --");
        assert_eq!(notice.value, "");
        assert!(!notice.focused);

        assert_eq!(line(&lines, "IMUF W").value, "32");
        assert_eq!(line(&lines, "ROLL Q").value, "6000");
    }

    #[test]
    fn staged_edits_show_before_commit() {
        let (mut store, mut menu) = open_menu(FeatureSet::all());
        descend(&mut menu, &mut store, "GAINS", PageId::Gains);

        for _ in 0..32 {
            if menu.active_page().unwrap().focused_entry().label == "ROLL  P" {
                break;
            }
            menu.handle_event(&mut store, NavEvent::Down);
        }
        menu.handle_event(&mut store, NavEvent::Right); // 45 -> 46

        let lines = render_lines(&menu);
        assert_eq!(line(&lines, "ROLL  P").value, "46");
        // Persistent record still untouched.
        assert_eq!(store.tuning(0).gains[0].p, 45);
    }
}

//! In-place editing of an [`FcoDocument`]
//!
//! Every mutator takes zero-based indices. An index that is out of range
//! leaves the document untouched and reports [`Edit::Ignored`].

use super::{
    Color, ColorBlock, DEFAULT_NAME, DEFAULT_SUBTITLE_TEXT, FcoDocument, Subgroup, Subtitle,
    tokenize,
};
use crate::formats::database::Symbol;

/// Outcome of a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Applied,
    /// An index was out of range, nothing changed.
    Ignored,
}

impl Edit {
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Edit::Applied
    }
}

impl From<Option<()>> for Edit {
    fn from(value: Option<()>) -> Self {
        if value.is_some() {
            Edit::Applied
        } else {
            Edit::Ignored
        }
    }
}

/// Swap two elements if both indices are valid.
fn swap_in<T>(items: &mut [T], a: usize, b: usize) -> Option<()> {
    if a >= items.len() || b >= items.len() {
        return None;
    }
    items.swap(a, b);
    Some(())
}

/// Remove an element if the index is valid.
fn remove_in<T>(items: &mut Vec<T>, index: usize) -> Option<()> {
    (index < items.len()).then(|| {
        items.remove(index);
    })
}

fn default_text() -> Vec<Symbol> {
    // Plain ASCII without escapes always tokenizes
    tokenize(DEFAULT_SUBTITLE_TEXT).unwrap_or_default()
}

impl FcoDocument {
    // ==================== Subgroups ====================

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.subgroups.len()
    }

    /// Subgroup names in order.
    #[must_use]
    pub fn group_names(&self) -> Vec<&str> {
        self.subgroups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Append a subgroup named `NO_NAME` holding one subtitle `Subtitle01`.
    ///
    /// Returns the index of the new subgroup.
    pub fn add_group(&mut self) -> usize {
        let mut subgroup = Subgroup::new(DEFAULT_NAME);
        subgroup.subtitles.push(Subtitle::new("Subtitle01", default_text()));
        self.subgroups.push(subgroup);
        tracing::debug!("Added subgroup {}", self.subgroups.len() - 1);
        self.subgroups.len() - 1
    }

    pub fn delete_group(&mut self, group: usize) -> Edit {
        remove_in(&mut self.subgroups, group).into()
    }

    pub fn swap_groups(&mut self, a: usize, b: usize) -> Edit {
        swap_in(&mut self.subgroups, a, b).into()
    }

    pub fn rename_group(&mut self, group: usize, name: impl Into<String>) -> Edit {
        self.subgroups
            .get_mut(group)
            .map(|g| g.name = name.into())
            .into()
    }

    // ==================== Subtitles ====================

    #[must_use]
    pub fn subtitles(&self, group: usize) -> Option<&[Subtitle]> {
        self.subgroups.get(group).map(|g| g.subtitles.as_slice())
    }

    #[must_use]
    pub fn subtitle(&self, group: usize, subtitle: usize) -> Option<&Subtitle> {
        self.subgroups.get(group)?.subtitles.get(subtitle)
    }

    fn subtitle_mut(&mut self, group: usize, subtitle: usize) -> Option<&mut Subtitle> {
        self.subgroups.get_mut(group)?.subtitles.get_mut(subtitle)
    }

    #[must_use]
    pub fn label(&self, group: usize, subtitle: usize) -> Option<&str> {
        self.subtitle(group, subtitle).map(|s| s.label.as_str())
    }

    /// Subtitle text with escape tokens spelled out.
    #[must_use]
    pub fn text(&self, group: usize, subtitle: usize) -> Option<String> {
        self.subtitle(group, subtitle).map(Subtitle::text)
    }

    /// Append a subtitle to `group`.
    ///
    /// An empty `label` becomes `NO_NAME` and empty `symbols` become
    /// `DUMMY SUBTITLE`.
    pub fn add_subtitle(&mut self, group: usize, label: &str, symbols: Vec<Symbol>) -> Edit {
        let Some(subgroup) = self.subgroups.get_mut(group) else {
            return Edit::Ignored;
        };

        let label = if label.is_empty() { DEFAULT_NAME } else { label };
        let symbols = if symbols.is_empty() {
            default_text()
        } else {
            symbols
        };
        subgroup.subtitles.push(Subtitle::new(label, symbols));
        Edit::Applied
    }

    pub fn delete_subtitle(&mut self, group: usize, subtitle: usize) -> Edit {
        self.subgroups
            .get_mut(group)
            .and_then(|g| remove_in(&mut g.subtitles, subtitle))
            .into()
    }

    pub fn swap_subtitles(&mut self, group: usize, a: usize, b: usize) -> Edit {
        self.subgroups
            .get_mut(group)
            .and_then(|g| swap_in(&mut g.subtitles, a, b))
            .into()
    }

    /// Replace a subtitle's text, usually with the output of
    /// [`validate_string`](super::validate_string).
    pub fn modify_subtitle(&mut self, group: usize, subtitle: usize, symbols: Vec<Symbol>) -> Edit {
        self.subtitle_mut(group, subtitle)
            .map(|s| s.symbols = symbols)
            .into()
    }

    pub fn rename_subtitle(&mut self, group: usize, subtitle: usize, label: impl Into<String>) -> Edit {
        self.subtitle_mut(group, subtitle)
            .map(|s| s.label = label.into())
            .into()
    }

    // ==================== Colors ====================

    #[must_use]
    pub fn color_blocks(&self, group: usize, subtitle: usize) -> Option<&[ColorBlock]> {
        self.subtitle(group, subtitle).map(|s| s.color_blocks.as_slice())
    }

    /// Append a default block covering symbols 0 to 1.
    pub fn add_color_block(&mut self, group: usize, subtitle: usize) -> Edit {
        self.subtitle_mut(group, subtitle)
            .map(|s| s.color_blocks.push(ColorBlock::default()))
            .into()
    }

    pub fn remove_color_block(&mut self, group: usize, subtitle: usize, block: usize) -> Edit {
        self.subtitle_mut(group, subtitle)
            .and_then(|s| remove_in(&mut s.color_blocks, block))
            .into()
    }

    pub fn remove_all_color_blocks(&mut self, group: usize, subtitle: usize) -> Edit {
        self.subtitle_mut(group, subtitle)
            .map(|s| s.color_blocks.clear())
            .into()
    }

    pub fn swap_color_blocks(&mut self, group: usize, subtitle: usize, a: usize, b: usize) -> Edit {
        self.subtitle_mut(group, subtitle)
            .and_then(|s| swap_in(&mut s.color_blocks, a, b))
            .into()
    }

    /// Replace a color block. A block whose `start` is past its `end` is
    /// rejected with [`Edit::Ignored`].
    pub fn modify_color_block(
        &mut self,
        group: usize,
        subtitle: usize,
        block: usize,
        value: ColorBlock,
    ) -> Edit {
        if !value.is_ordered() {
            tracing::debug!("Rejected color block {}..{}", value.start, value.end);
            return Edit::Ignored;
        }
        self.subtitle_mut(group, subtitle)
            .and_then(|s| s.color_blocks.get_mut(block))
            .map(|b| *b = value)
            .into()
    }

    #[must_use]
    pub fn default_color(&self, group: usize, subtitle: usize) -> Option<Color> {
        self.subtitle(group, subtitle).map(|s| s.default_color)
    }

    pub fn set_default_color(&mut self, group: usize, subtitle: usize, color: Color) -> Edit {
        self.subtitle_mut(group, subtitle)
            .map(|s| s.default_color = color)
            .into()
    }

    // ==================== Search ====================

    /// Find the next subtitle whose text contains `needle`.
    ///
    /// The search starts at `(start_group, start_subtitle)` inclusive and moves
    /// forward. Subgroups after the first one are searched from their first
    /// subtitle.
    #[must_use]
    pub fn find_next(
        &self,
        needle: &str,
        start_group: usize,
        start_subtitle: usize,
    ) -> Option<(usize, usize)> {
        for (group, subgroup) in self.subgroups.iter().enumerate().skip(start_group) {
            let first = if group == start_group { start_subtitle } else { 0 };
            for (index, subtitle) in subgroup.subtitles.iter().enumerate().skip(first) {
                if subtitle.text().contains(needle) {
                    return Some((group, index));
                }
            }
        }
        None
    }
}

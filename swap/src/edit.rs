//! Tracking which amount field is being typed into.
//!
//! The marker is the single-writer token for a derivation pass: the field it
//! names is the driver and is never overwritten by the engine.

use serde::{Deserialize, Serialize};

use crate::state::{ConversionState, Field};

/// Which amount field, if any, is authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditMarker {
    /// No field has focus.
    #[default]
    None,
    /// The source amount has focus.
    EditingSource,
    /// The target amount has focus.
    EditingTarget,
}

impl EditMarker {
    /// Marker for a focused field.
    pub fn editing(field: Field) -> Self {
        match field {
            Field::Source => EditMarker::EditingSource,
            Field::Target => EditMarker::EditingTarget,
        }
    }

    /// Check if `field` is the one being edited.
    pub fn is_editing(&self, field: Field) -> bool {
        *self == Self::editing(field)
    }

    /// The field being edited, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            EditMarker::None => None,
            EditMarker::EditingSource => Some(Field::Source),
            EditMarker::EditingTarget => Some(Field::Target),
        }
    }
}

/// Record focus-in on `field`. Any previous marker is replaced.
pub fn mark_editing(mut state: ConversionState, field: Field) -> ConversionState {
    state.edit_marker = EditMarker::editing(field);
    state
}

/// Record focus-out.
pub fn clear_editing(mut state: ConversionState) -> ConversionState {
    state.edit_marker = EditMarker::None;
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_clear() {
        let state = mark_editing(ConversionState::new(), Field::Source);
        assert_eq!(state.edit_marker, EditMarker::EditingSource);

        let state = mark_editing(state, Field::Target);
        assert_eq!(state.edit_marker, EditMarker::EditingTarget);
        assert!(!state.edit_marker.is_editing(Field::Source));

        let state = clear_editing(state);
        assert_eq!(state.edit_marker, EditMarker::None);
        assert_eq!(state.edit_marker.field(), None);
    }

    #[test]
    fn test_marker_leaves_amounts_alone() {
        let before = ConversionState::new().with_source_amount("12");
        let after = mark_editing(before.clone(), Field::Target);

        assert_eq!(after.source_amount, before.source_amount);
        assert_eq!(after.target_amount, before.target_amount);
    }
}

//! Field flags (`/Ff`) for interactive form fields.
//!
//! Per ISO 32000-1:2008 Section 12.7.3.1. Bits 1-3 are shared by every
//! field type; the rest are type specific.

use bitflags::bitflags;

bitflags! {
    /// Text field flags (field type Tx).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TextFieldFlags: u32 {
        /// Bit 1: Field is read-only
        const READ_ONLY = 1 << 0;
        /// Bit 2: Field must have a value before submit
        const REQUIRED = 1 << 1;
        /// Bit 3: Field should not be exported
        const NO_EXPORT = 1 << 2;

        /// Bit 13: Text may include multiple lines
        const MULTILINE = 1 << 12;
        /// Bit 14: Text is displayed as asterisks
        const PASSWORD = 1 << 13;
        /// Bit 24: Text should not scroll beyond visible area
        const DO_NOT_SCROLL = 1 << 23;
    }
}

bitflags! {
    /// Button field flags (field type Btn).
    ///
    /// A button with neither RADIO nor PUSHBUTTON set is a checkbox.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonFieldFlags: u32 {
        /// Bit 1: Field is read-only
        const READ_ONLY = 1 << 0;
        /// Bit 2: Field must have a value before submit
        const REQUIRED = 1 << 1;
        /// Bit 3: Field should not be exported
        const NO_EXPORT = 1 << 2;

        /// Bit 15: Clicking the selected radio button does not deselect it
        const NO_TOGGLE_TO_OFF = 1 << 14;
        /// Bit 16: Radio button group
        const RADIO = 1 << 15;
        /// Bit 17: Push button
        const PUSHBUTTON = 1 << 16;
    }
}

bitflags! {
    /// Choice field flags (field type Ch).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ChoiceFieldFlags: u32 {
        /// Bit 1: Field is read-only
        const READ_ONLY = 1 << 0;
        /// Bit 2: Field must have a value before submit
        const REQUIRED = 1 << 1;
        /// Bit 3: Field should not be exported
        const NO_EXPORT = 1 << 2;

        /// Bit 18: Drop-down combo box; a list box otherwise
        const COMBO = 1 << 17;
        /// Bit 19: Combo box also accepts typed text
        const EDIT = 1 << 18;
        /// Bit 20: Options are sorted
        const SORT = 1 << 19;
    }
}

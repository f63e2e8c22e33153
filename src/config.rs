//! Page geometry and typography constants for form layout.

/// Layout configuration.
///
/// Every distance is in PDF points. The defaults produce an A4 page with
/// 50pt margins and 25pt-high single-line fields.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Page width.
    pub page_width: f32,

    /// Page height.
    pub page_height: f32,

    /// Left, right and top margin.
    pub margin: f32,

    /// Height of a single-line field, and the side of a checkbox or radio control.
    pub field_height: f32,

    /// Gap between a label row and the field below it.
    pub label_gap: f32,

    /// The logo is scaled so its longer side equals this.
    pub logo_size: f32,

    /// Offset of the logo from the top-left page corner.
    pub logo_margin: f32,

    /// Font size of the centered title.
    pub title_font_size: f32,

    /// Font size of the description lines.
    pub description_font_size: f32,

    /// Distance between successive description baselines.
    pub description_line_spacing: f32,

    /// Distance from the title baseline to the first description line.
    pub title_gap: f32,

    /// Distance from the title baseline to the first element, for a
    /// single-line description.
    pub header_gap: f32,

    /// Extra space after every element.
    pub element_spacing: f32,

    /// Extra space between stacked checkbox or radio options.
    pub option_spacing: f32,

    /// Vertical offset of an option caption above its control's bottom edge.
    pub option_caption_offset: f32,

    /// Font size used inside multi-line fields.
    pub multiline_font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create a configuration with the default A4 geometry.
    pub fn new() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 50.0,
            field_height: 25.0,
            label_gap: 5.0,
            logo_size: 50.0,
            logo_margin: 20.0,
            title_font_size: 18.0,
            description_font_size: 12.0,
            description_line_spacing: 15.0,
            title_gap: 30.0,
            header_gap: 60.0,
            element_spacing: 10.0,
            option_spacing: 5.0,
            option_caption_offset: 5.0,
            multiline_font_size: 10.0,
        }
    }

    /// Set the page size.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set the page margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the single-line field height.
    pub fn with_field_height(mut self, height: f32) -> Self {
        self.field_height = height;
        self
    }

    /// Set the label-to-field gap.
    pub fn with_label_gap(mut self, gap: f32) -> Self {
        self.label_gap = gap;
        self
    }

    /// Set the logo box size and its offset from the page corner.
    pub fn with_logo_box(mut self, size: f32, margin: f32) -> Self {
        self.logo_size = size;
        self.logo_margin = margin;
        self
    }

    /// Set the title font size.
    pub fn with_title_font_size(mut self, size: f32) -> Self {
        self.title_font_size = size;
        self
    }

    /// Set the spacing added after every element.
    pub fn with_element_spacing(mut self, spacing: f32) -> Self {
        self.element_spacing = spacing;
        self
    }

    /// Width available to full-width fields.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Vertical pitch of one stacked checkbox or radio option.
    pub fn option_pitch(&self) -> f32 {
        self.field_height + self.option_spacing
    }

    /// Lowest y a field may reach without crossing the bottom margin.
    pub fn bottom_limit(&self) -> f32 {
        self.margin
    }
}

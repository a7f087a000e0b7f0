//! FILENAME: core/element-engine/src/element.rs
//! PURPOSE: A report column instance and the resolution of its effective settings.
//! CONTEXT: An element references one catalog column and overrides some of its
//! settings. Every effective value (type, display name, format, aggregate)
//! falls back to the catalog entry when the element does not override it.
//!
//! The catalog entry is resolved lazily and cached on the element. The cache is
//! cleared explicitly when the column reference or the catalog source changes.
//! An element is edited by one session at a time: the cache is not thread-safe.

use std::fmt;
use std::sync::Arc;

use once_cell::unsync::OnceCell;

use format_engine::logging::{self, log_debug, log_warn};
use format_engine::{
    chart_format, format_value_or_default, spreadsheet_format, Classification, Locale, RawValue,
    TranslatedFormats,
};

use crate::catalog::{ColumnCatalog, ColumnCatalogEntry, EnumDefinition};
use crate::definition::{
    AggregateFunction, AxisType, CalculationOption, ColumnType, DateTimeStandardFormat,
    Nvd3SerieType, NumericStandardFormat, PivotPosition, PointSortOrder, SerieDefinition,
    SerieSortType, SeriesChartType, ShowTotal, SortOrder,
};
use crate::editor::{EditorPolicy, PolicyInputs};
use crate::error::CatalogError;
use crate::style::CellCss;
use crate::translation::{IdentityTranslator, Translator};

/// Format used when neither the element nor the catalog define one.
pub const FALLBACK_FORMAT: &str = "0";

/// A column placed on a report. Cloning copies the identifier too: a clone is
/// the same element, and callers that need a distinct one use [`ReportElement::create`].
#[derive(Clone)]
pub struct ReportElement {
    id: String,
    column_id: String,
    source: Option<Arc<dyn ColumnCatalog>>,
    column: OnceCell<Option<Arc<ColumnCatalogEntry>>>,

    pivot_position: PivotPosition,

    // Overrides
    display_name: String,
    column_type: ColumnType,
    format: String,
    numeric_standard_format: NumericStandardFormat,
    datetime_standard_format: DateTimeStandardFormat,
    sort_order: SortOrder,
    has_html_tags: Option<bool>,

    // Data options
    aggregate_function: AggregateFunction,
    calculation_option: CalculationOption,
    show_total: ShowTotal,
    total_aggregate_function: AggregateFunction,

    // Chart
    serie_definition: SerieDefinition,
    serie_type: SeriesChartType,
    nvd3_serie: Nvd3SerieType,
    x_axis_type: AxisType,
    y_axis_type: AxisType,
    serie_sort_order: PointSortOrder,
    serie_sort_type: SerieSortType,
    axis_use_values: bool,

    // Advanced
    sql: String,
    cell_css: String,
    cell_script: String,
    drill_enabled: bool,
    sub_reports_enabled: bool,

    policy: EditorPolicy,
}

impl fmt::Debug for ReportElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportElement")
            .field("id", &self.id)
            .field("column_id", &self.column_id)
            .field("has_source", &self.source.is_some())
            .field("pivot_position", &self.pivot_position)
            .field("display_name", &self.display_name)
            .field("column_type", &self.column_type)
            .field("format", &self.format)
            .field("aggregate_function", &self.aggregate_function)
            .field("serie_definition", &self.serie_definition)
            .finish_non_exhaustive()
    }
}

impl Default for ReportElement {
    fn default() -> Self {
        let mut element = ReportElement {
            id: String::new(),
            column_id: String::new(),
            source: None,
            column: OnceCell::new(),
            pivot_position: PivotPosition::Row,
            display_name: String::new(),
            column_type: ColumnType::Default,
            format: String::new(),
            numeric_standard_format: NumericStandardFormat::Default,
            datetime_standard_format: DateTimeStandardFormat::Default,
            sort_order: SortOrder::AutomaticAscending,
            has_html_tags: None,
            aggregate_function: AggregateFunction::Sum,
            calculation_option: CalculationOption::No,
            show_total: ShowTotal::No,
            total_aggregate_function: AggregateFunction::Sum,
            serie_definition: SerieDefinition::None,
            serie_type: SeriesChartType::Point,
            nvd3_serie: Nvd3SerieType::ScatterChart,
            x_axis_type: AxisType::Primary,
            y_axis_type: AxisType::Primary,
            serie_sort_order: PointSortOrder::Ascending,
            serie_sort_type: SerieSortType::Y,
            axis_use_values: true,
            sql: String::new(),
            cell_css: String::new(),
            cell_script: String::new(),
            drill_enabled: true,
            sub_reports_enabled: true,
            policy: EditorPolicy::default(),
        };
        element.refresh_editor_policy();
        element
    }
}

impl ReportElement {
    /// A new Row element with a fresh identifier.
    pub fn create() -> Self {
        ReportElement {
            id: uuid::Uuid::new_v4().to_string(),
            ..ReportElement::default()
        }
    }

    /// A new element bound to a catalog column.
    pub fn for_column(source: Arc<dyn ColumnCatalog>, column_id: impl Into<String>) -> Self {
        let mut element = ReportElement::create();
        element.source = Some(source);
        element.column_id = column_id.into();
        element.invalidate_column();
        element
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    // ========================================================================
    // CATALOG REFERENCE
    // ========================================================================

    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    /// Point the element at another column and drop the cached entry.
    pub fn change_column(&mut self, column_id: impl Into<String>) {
        self.column_id = column_id.into();
        self.invalidate_column();
    }

    /// Attach a catalog source and drop the cached entry.
    pub fn set_source(&mut self, source: Arc<dyn ColumnCatalog>) {
        self.source = Some(source);
        self.invalidate_column();
    }

    /// Drop the cached catalog entry; the next query resolves it again.
    pub fn invalidate_column(&mut self) {
        self.column.take();
        self.refresh_editor_policy();
    }

    /// Resolve the referenced catalog entry, reporting why it is unavailable.
    pub fn try_column(&self) -> Result<Arc<ColumnCatalogEntry>, CatalogError> {
        if self.column_id.is_empty() {
            return Err(CatalogError::NoColumnReference);
        }
        let source = self.source.as_ref().ok_or(CatalogError::NoSource)?;
        source.lookup(&self.column_id)
    }

    /// The cached catalog entry. A failed lookup is cached as "no catalog data".
    pub fn column(&self) -> Option<&ColumnCatalogEntry> {
        self.column
            .get_or_init(|| match self.try_column() {
                Ok(entry) => Some(entry),
                Err(CatalogError::NoColumnReference) => None,
                Err(e) => {
                    log_warn!(logging::CATALOG, "element {}: {}", self.id, e);
                    None
                }
            })
            .as_deref()
    }

    fn source_is_no_sql(&self) -> bool {
        self.source.as_ref().map(|s| s.is_no_sql()).unwrap_or(false)
    }

    fn enumeration(&self) -> Option<&EnumDefinition> {
        self.column().and_then(|c| c.enumeration.as_deref())
    }

    // ========================================================================
    // CLASSIFICATION
    // ========================================================================

    /// Data element counting rows: always numeric.
    fn is_count_data(&self) -> bool {
        self.pivot_position == PivotPosition::Data
            && self.aggregate_function == AggregateFunction::Count
    }

    /// Type override, else the catalog's declared type. Without catalog data
    /// the type is Text.
    pub fn resolved_column_type(&self) -> ColumnType {
        if self.column_type != ColumnType::Default {
            return self.column_type;
        }
        match self.column().map(|c| c.column_type) {
            Some(ColumnType::Default) | None => ColumnType::Text,
            Some(declared) => declared,
        }
    }

    pub fn is_enum(&self) -> bool {
        !self.is_count_data() && self.enumeration().is_some()
    }

    pub fn is_numeric(&self) -> bool {
        self.is_count_data() || self.resolved_column_type() == ColumnType::Numeric
    }

    pub fn is_datetime(&self) -> bool {
        !self.is_count_data() && self.resolved_column_type() == ColumnType::DateTime
    }

    pub fn is_text(&self) -> bool {
        !self.is_count_data() && self.resolved_column_type() == ColumnType::Text
    }

    /// Effective classification. Counted Data elements are Numeric; an
    /// enumerated column is Enum; otherwise the resolved column type decides.
    pub fn classification(&self) -> Classification {
        if self.is_count_data() {
            Classification::Numeric
        } else if self.enumeration().is_some() {
            Classification::Enum
        } else {
            self.format_classification()
        }
    }

    /// Classification used for format decisions (enumerations format like
    /// their underlying type).
    pub fn format_classification(&self) -> Classification {
        if self.is_numeric() {
            Classification::Numeric
        } else if self.is_datetime() {
            Classification::DateTime
        } else {
            Classification::Text
        }
    }

    /// Initial aggregate for the element's kind of values: Enum and Text count,
    /// Numeric sums, DateTime takes the latest. Computed without the Count
    /// special case so that reapplying it is stable.
    pub fn default_aggregate(&self) -> AggregateFunction {
        if self.enumeration().is_some() {
            return AggregateFunction::Count;
        }
        match self.resolved_column_type() {
            ColumnType::Numeric => AggregateFunction::Sum,
            ColumnType::DateTime => AggregateFunction::Max,
            _ => AggregateFunction::Count,
        }
    }

    /// Reset the aggregate to its default.
    pub fn set_defaults(&mut self) {
        let aggregate = self.default_aggregate();
        self.set_aggregate_function(aggregate);
    }

    // ========================================================================
    // DISPLAY NAME
    // ========================================================================

    /// Name derived from the catalog. Data elements aggregated by something
    /// other than Sum or Count read "<aggregate> of <column>" unless the column
    /// is aggregated upstream.
    pub fn raw_display_name(&self) -> String {
        self.raw_display_name_with(&IdentityTranslator)
    }

    /// Catalog-derived name with the "<aggregate> of" prefix translated.
    pub fn raw_display_name_with(&self, translator: &dyn Translator) -> String {
        let Some(column) = self.column() else {
            return String::new();
        };
        let synthesize = self.pivot_position == PivotPosition::Data
            && self.is_numeric()
            && !matches!(
                self.aggregate_function,
                AggregateFunction::Sum | AggregateFunction::Count
            )
            && !column.is_aggregate;
        if synthesize {
            let prefix = format!("{} of", self.aggregate_function.label());
            format!("{} {}", translator.translate_element(self, &prefix), column.display_name)
        } else {
            column.display_name.clone()
        }
    }

    /// Override if set, else the catalog-derived name.
    pub fn display_name(&self) -> String {
        if self.display_name.is_empty() {
            self.raw_display_name()
        } else {
            self.display_name.clone()
        }
    }

    /// Display name in the active language.
    pub fn display_name_translated(&self, translator: &dyn Translator) -> String {
        if self.display_name.is_empty() {
            self.raw_display_name_with(translator)
        } else {
            translator.translate_element(self, &self.display_name)
        }
    }

    /// Set the override. A name equal to the catalog-derived one clears it.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.column().is_some() && name == self.raw_display_name() {
            self.display_name.clear();
        } else {
            self.display_name = name;
        }
    }

    pub fn display_name_override(&self) -> &str {
        &self.display_name
    }

    // ========================================================================
    // FORMAT
    // ========================================================================

    fn catalog_format(&self) -> &str {
        self.column().map(|c| c.format.as_str()).unwrap_or_default()
    }

    /// Effective native format.
    pub fn effective_format(&self) -> String {
        let format = if self.is_numeric()
            && self.numeric_standard_format == NumericStandardFormat::Default
        {
            self.catalog_format()
        } else if self.is_numeric() && !self.format.is_empty() {
            self.format.as_str()
        } else if self.is_datetime()
            && self.datetime_standard_format == DateTimeStandardFormat::Default
        {
            self.catalog_format()
        } else if self.is_datetime() && !self.format.is_empty() {
            self.format.as_str()
        } else if self.is_text() && !self.format.is_empty() {
            self.format.as_str()
        } else {
            self.catalog_format()
        };

        if format.is_empty() {
            FALLBACK_FORMAT.to_string()
        } else {
            format.to_string()
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Set the free-text format. A non-empty format turns the `Default`
    /// selector of the current classification into `Custom`.
    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = format.into();
        if !self.format.is_empty() {
            if self.is_numeric() && self.numeric_standard_format == NumericStandardFormat::Default {
                self.numeric_standard_format = NumericStandardFormat::Custom;
            }
            if self.is_datetime() && self.datetime_standard_format == DateTimeStandardFormat::Default {
                self.datetime_standard_format = DateTimeStandardFormat::Custom;
            }
        }
        self.refresh_editor_policy();
    }

    pub fn numeric_standard_format(&self) -> NumericStandardFormat {
        self.numeric_standard_format
    }

    /// Select a numeric preset; presets write their token into the format.
    pub fn set_numeric_standard_format(&mut self, standard: NumericStandardFormat) {
        self.numeric_standard_format = standard;
        if let Some(token) = standard.token() {
            self.format = token.to_string();
        }
        self.refresh_editor_policy();
    }

    pub fn datetime_standard_format(&self) -> DateTimeStandardFormat {
        self.datetime_standard_format
    }

    /// Select a date/time preset; presets write their token into the format.
    pub fn set_datetime_standard_format(&mut self, standard: DateTimeStandardFormat) {
        self.datetime_standard_format = standard;
        if let Some(token) = standard.token() {
            self.format = token.to_string();
        }
        self.refresh_editor_policy();
    }

    /// Chart-library format of the effective format.
    pub fn chart_format(&self, locale: &Locale) -> String {
        chart_format(&self.effective_format(), self.format_classification(), locale)
    }

    /// Spreadsheet format of the effective format.
    pub fn spreadsheet_format(&self, locale: &Locale) -> String {
        spreadsheet_format(&self.effective_format(), self.format_classification(), locale)
    }

    pub fn translated_formats(&self, locale: &Locale) -> TranslatedFormats {
        format_engine::translate(&self.effective_format(), self.format_classification(), locale)
    }

    /// Locale-aware display string of a raw value. A format the formatter
    /// rejects falls back to the value's default string form.
    pub fn display_value(&self, value: &RawValue, locale: &Locale) -> String {
        if !value.is_formattable() {
            return value.to_string();
        }
        let format = self.effective_format();
        format_value_or_default(value, &format, locale)
    }

    // ========================================================================
    // SORTING
    // ========================================================================

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.sort_order = sort_order;
    }

    pub fn is_sorted(&self) -> bool {
        self.sort_order.is_sorted()
    }

    /// Sort key of an enumerated value, looked up by identifier or by display
    /// value. Sorted elements over a position-ordered enumeration get a
    /// six-digit position prefix. Unknown values are their own key.
    pub fn sort_key(&self, value: &str, use_display_value: bool) -> String {
        let Some(enumeration) = self.enumeration() else {
            return value.to_string();
        };
        let Some(found) = enumeration.find(value, use_display_value) else {
            return value.to_string();
        };

        let position = if self.is_sorted() && enumeration.use_position {
            enumeration.last_position(found)
        } else {
            None
        };
        match position {
            Some(position) => format!("{:06}{}", position, found.display_value),
            None => found.display_value.clone(),
        }
    }

    // ========================================================================
    // SQL
    // ========================================================================

    /// Column expression, aggregated for Data elements over raw columns.
    pub fn raw_sql_column(&self) -> String {
        let Some(column) = self.column() else {
            return String::new();
        };
        if self.pivot_position == PivotPosition::Data && !column.is_aggregate {
            self.aggregate_function.sql(&column.name)
        } else {
            column.name.clone()
        }
    }

    /// Custom SQL if set, else the raw column expression.
    pub fn sql_column(&self) -> String {
        if self.sql.is_empty() {
            self.raw_sql_column()
        } else {
            self.sql.clone()
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
    }

    // ========================================================================
    // PLACEMENT, TYPE & DATA OPTIONS
    // ========================================================================

    pub fn pivot_position(&self) -> PivotPosition {
        self.pivot_position
    }

    pub fn set_pivot_position(&mut self, position: PivotPosition) {
        self.pivot_position = position;
        self.refresh_editor_policy();
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn set_column_type(&mut self, column_type: ColumnType) {
        self.column_type = column_type;
        self.refresh_editor_policy();
    }

    pub fn aggregate_function(&self) -> AggregateFunction {
        self.aggregate_function
    }

    pub fn set_aggregate_function(&mut self, aggregate: AggregateFunction) {
        self.aggregate_function = aggregate;
        self.refresh_editor_policy();
    }

    pub fn calculation_option(&self) -> CalculationOption {
        self.calculation_option
    }

    /// Percentage calculations select a percentage format unless a format is
    /// already set. Going back to `No` clears a preset-written format.
    pub fn set_calculation_option(&mut self, option: CalculationOption) {
        self.calculation_option = option;
        if option != CalculationOption::No && self.format.is_empty() {
            log_debug!(logging::ELEMENT, "element {}: {:?} selects percentage format", self.id, option);
            self.set_numeric_standard_format(NumericStandardFormat::Percentage0);
        } else if option == CalculationOption::No
            && self.numeric_standard_format != NumericStandardFormat::Custom
        {
            log_debug!(logging::ELEMENT, "element {}: calculation reset clears format", self.id);
            self.format.clear();
            self.numeric_standard_format = NumericStandardFormat::Custom;
        }
        self.refresh_editor_policy();
    }

    pub fn show_total(&self) -> ShowTotal {
        self.show_total
    }

    pub fn set_show_total(&mut self, show_total: ShowTotal) {
        self.show_total = show_total;
        self.refresh_editor_policy();
    }

    pub fn total_aggregate_function(&self) -> AggregateFunction {
        self.total_aggregate_function
    }

    pub fn set_total_aggregate_function(&mut self, aggregate: AggregateFunction) {
        self.total_aggregate_function = aggregate;
    }

    // ========================================================================
    // CHART OPTIONS
    // ========================================================================

    pub fn serie_definition(&self) -> SerieDefinition {
        self.serie_definition
    }

    pub fn set_serie_definition(&mut self, serie_definition: SerieDefinition) {
        self.serie_definition = serie_definition;
        self.refresh_editor_policy();
    }

    pub fn is_serie(&self) -> bool {
        self.serie_definition.is_serie()
    }

    pub fn serie_type(&self) -> SeriesChartType {
        self.serie_type
    }

    pub fn set_serie_type(&mut self, serie_type: SeriesChartType) {
        self.serie_type = serie_type;
    }

    pub fn nvd3_serie(&self) -> Nvd3SerieType {
        self.nvd3_serie
    }

    pub fn set_nvd3_serie(&mut self, nvd3_serie: Nvd3SerieType) {
        self.nvd3_serie = nvd3_serie;
    }

    pub fn x_axis_type(&self) -> AxisType {
        self.x_axis_type
    }

    pub fn set_x_axis_type(&mut self, axis: AxisType) {
        self.x_axis_type = axis;
    }

    pub fn y_axis_type(&self) -> AxisType {
        self.y_axis_type
    }

    pub fn set_y_axis_type(&mut self, axis: AxisType) {
        self.y_axis_type = axis;
    }

    pub fn serie_sort_order(&self) -> PointSortOrder {
        self.serie_sort_order
    }

    pub fn set_serie_sort_order(&mut self, order: PointSortOrder) {
        self.serie_sort_order = order;
    }

    pub fn serie_sort_type(&self) -> SerieSortType {
        self.serie_sort_type
    }

    pub fn set_serie_sort_type(&mut self, sort_type: SerieSortType) {
        self.serie_sort_type = sort_type;
        self.refresh_editor_policy();
    }

    pub fn axis_use_values(&self) -> bool {
        self.axis_use_values
    }

    pub fn set_axis_use_values(&mut self, use_values: bool) {
        self.axis_use_values = use_values;
    }

    // ========================================================================
    // ADVANCED
    // ========================================================================

    /// Override, else the catalog flag, else false.
    pub fn has_html_tags(&self) -> bool {
        self.has_html_tags
            .or_else(|| self.column().and_then(|c| c.has_html_tags))
            .unwrap_or(false)
    }

    pub fn set_has_html_tags(&mut self, has_html_tags: Option<bool>) {
        self.has_html_tags = has_html_tags;
    }

    pub fn cell_css(&self) -> CellCss {
        CellCss::parse(&self.cell_css)
    }

    pub fn cell_css_spec(&self) -> &str {
        &self.cell_css
    }

    pub fn set_cell_css(&mut self, spec: impl Into<String>) {
        self.cell_css = spec.into();
    }

    pub fn cell_script(&self) -> &str {
        &self.cell_script
    }

    pub fn set_cell_script(&mut self, script: impl Into<String>) {
        self.cell_script = script.into();
    }

    pub fn drill_enabled(&self) -> bool {
        self.drill_enabled
    }

    pub fn set_drill_enabled(&mut self, enabled: bool) {
        self.drill_enabled = enabled;
    }

    pub fn sub_reports_enabled(&self) -> bool {
        self.sub_reports_enabled
    }

    pub fn set_sub_reports_enabled(&mut self, enabled: bool) {
        self.sub_reports_enabled = enabled;
    }

    // ========================================================================
    // EDITOR POLICY
    // ========================================================================

    pub fn policy_inputs(&self) -> PolicyInputs {
        PolicyInputs {
            placement: self.pivot_position,
            serie_definition: self.serie_definition,
            serie_sort_type: self.serie_sort_type,
            show_total: self.show_total,
            numeric_standard_format: self.numeric_standard_format,
            datetime_standard_format: self.datetime_standard_format,
            is_enum: self.is_enum(),
            is_numeric: self.is_numeric(),
            is_datetime: self.is_datetime(),
            column_is_aggregate: self.column().map(|c| c.is_aggregate).unwrap_or(false),
            source_is_no_sql: self.source_is_no_sql(),
        }
    }

    /// Recompute visibility/read-only flags. Property values are untouched.
    pub fn refresh_editor_policy(&mut self) {
        self.policy = EditorPolicy::derive(&self.policy_inputs());
    }

    pub fn policy(&self) -> &EditorPolicy {
        &self.policy
    }
}

//! FILENAME: core/element-engine/src/editor.rs
//! PURPOSE: Visibility and read-only policy of element properties.
//! CONTEXT: An external editor decides which element properties it shows and
//! lets the user change. The rules are a declarative table over a small set of
//! inputs (placement, series role, classification, standard formats, totals,
//! series sort type). Deriving the policy never touches property values.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::definition::{
    DateTimeStandardFormat, NumericStandardFormat, PivotPosition, SerieDefinition, SerieSortType,
    ShowTotal,
};
use crate::error::ElementError;

/// Editable properties of a report element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementProperty {
    DisplayName,
    Sql,
    CellCss,
    HasHtmlTags,
    SortOrder,
    Format,
    ColumnType,
    AggregateFunction,
    TotalAggregateFunction,
    ShowTotal,
    CellScript,
    CalculationOption,
    NumericStandardFormat,
    DateTimeStandardFormat,
    SerieDefinition,
    SerieType,
    Nvd3Serie,
    XAxisType,
    YAxisType,
    SerieSortOrder,
    SerieSortType,
    AxisUseValues,
    DrillEnabled,
    SubReportsEnabled,
}

impl ElementProperty {
    pub const ALL: [ElementProperty; 24] = [
        ElementProperty::DisplayName,
        ElementProperty::Sql,
        ElementProperty::CellCss,
        ElementProperty::HasHtmlTags,
        ElementProperty::SortOrder,
        ElementProperty::Format,
        ElementProperty::ColumnType,
        ElementProperty::AggregateFunction,
        ElementProperty::TotalAggregateFunction,
        ElementProperty::ShowTotal,
        ElementProperty::CellScript,
        ElementProperty::CalculationOption,
        ElementProperty::NumericStandardFormat,
        ElementProperty::DateTimeStandardFormat,
        ElementProperty::SerieDefinition,
        ElementProperty::SerieType,
        ElementProperty::Nvd3Serie,
        ElementProperty::XAxisType,
        ElementProperty::YAxisType,
        ElementProperty::SerieSortOrder,
        ElementProperty::SerieSortType,
        ElementProperty::AxisUseValues,
        ElementProperty::DrillEnabled,
        ElementProperty::SubReportsEnabled,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ElementProperty::DisplayName => "DisplayName",
            ElementProperty::Sql => "SQL",
            ElementProperty::CellCss => "CellCss",
            ElementProperty::HasHtmlTags => "HasHTMLTags",
            ElementProperty::SortOrder => "SortOrder",
            ElementProperty::Format => "Format",
            ElementProperty::ColumnType => "Type",
            ElementProperty::AggregateFunction => "AggregateFunction",
            ElementProperty::TotalAggregateFunction => "TotalAggregateFunction",
            ElementProperty::ShowTotal => "ShowTotal",
            ElementProperty::CellScript => "CellScript",
            ElementProperty::CalculationOption => "CalculationOption",
            ElementProperty::NumericStandardFormat => "NumericStandardFormat",
            ElementProperty::DateTimeStandardFormat => "DateTimeStandardFormat",
            ElementProperty::SerieDefinition => "SerieDefinition",
            ElementProperty::SerieType => "SerieType",
            ElementProperty::Nvd3Serie => "Nvd3Serie",
            ElementProperty::XAxisType => "XAxisType",
            ElementProperty::YAxisType => "YAxisType",
            ElementProperty::SerieSortOrder => "SerieSortOrder",
            ElementProperty::SerieSortType => "SerieSortType",
            ElementProperty::AxisUseValues => "AxisUseValues",
            ElementProperty::DrillEnabled => "DrillEnabled",
            ElementProperty::SubReportsEnabled => "SubReportsEnabled",
        }
    }
}

impl fmt::Display for ElementProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementProperty {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementProperty::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ElementError::UnknownProperty(s.to_string()))
    }
}

/// How the editor presents one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PropertyState {
    pub browsable: bool,
    pub read_only: bool,
}

impl PropertyState {
    pub fn new(browsable: bool, read_only: bool) -> Self {
        PropertyState { browsable, read_only }
    }

    /// Shown and editable.
    pub fn is_editable(&self) -> bool {
        self.browsable && !self.read_only
    }
}

/// Everything the policy depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PolicyInputs {
    pub placement: PivotPosition,
    pub serie_definition: SerieDefinition,
    pub serie_sort_type: SerieSortType,
    pub show_total: ShowTotal,
    pub numeric_standard_format: NumericStandardFormat,
    pub datetime_standard_format: DateTimeStandardFormat,
    pub is_enum: bool,
    pub is_numeric: bool,
    pub is_datetime: bool,
    pub column_is_aggregate: bool,
    pub source_is_no_sql: bool,
}

/// Per-property visibility/read-only flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorPolicy {
    states: FxHashMap<ElementProperty, PropertyState>,
}

impl EditorPolicy {
    /// Derive the policy from its inputs.
    pub fn derive(inputs: &PolicyInputs) -> Self {
        use ElementProperty as P;

        let data = inputs.placement == PivotPosition::Data;
        let serie = inputs.serie_definition;
        let is_serie = serie.is_serie();
        let show_format = inputs.is_enum || inputs.is_datetime || inputs.is_numeric;

        let mut policy = EditorPolicy::default();
        let mut set = |property: ElementProperty, browsable: bool, read_only: bool| {
            policy.states.insert(property, PropertyState::new(browsable, read_only));
        };

        // Definition
        set(P::DisplayName, true, false);
        set(P::SortOrder, true, false);
        set(P::Sql, !inputs.source_is_no_sql, false);
        set(P::ColumnType, !inputs.source_is_no_sql, false);
        set(P::CellCss, true, false);
        set(P::HasHtmlTags, true, false);
        set(P::CellScript, true, false);

        // Format
        set(
            P::Format,
            show_format,
            (inputs.is_numeric && inputs.numeric_standard_format != NumericStandardFormat::Custom)
                || (inputs.is_datetime
                    && inputs.datetime_standard_format != DateTimeStandardFormat::Custom),
        );
        set(P::NumericStandardFormat, show_format && inputs.is_numeric, false);
        set(P::DateTimeStandardFormat, show_format && inputs.is_datetime, false);

        // Data options
        set(P::AggregateFunction, data && !inputs.column_is_aggregate, false);
        set(P::ShowTotal, data, false);
        set(P::TotalAggregateFunction, data, inputs.show_total == ShowTotal::No);
        set(P::CalculationOption, data && inputs.is_numeric, false);

        // Chart
        set(P::SerieDefinition, inputs.placement != PivotPosition::Page, false);
        set(
            P::SerieType,
            data && serie == SerieDefinition::Serie,
            serie != SerieDefinition::Serie,
        );
        set(
            P::Nvd3Serie,
            data && serie == SerieDefinition::Nvd3Serie,
            serie != SerieDefinition::Nvd3Serie,
        );
        set(
            P::XAxisType,
            matches!(inputs.placement, PivotPosition::Row | PivotPosition::Column)
                || (data && serie == SerieDefinition::Serie),
            matches!(
                serie,
                SerieDefinition::None | SerieDefinition::Nvd3Serie | SerieDefinition::SplitterBoth
            ),
        );
        set(P::YAxisType, data, !is_serie);
        set(
            P::SerieSortOrder,
            data && is_serie,
            !is_serie || inputs.serie_sort_type == SerieSortType::None,
        );
        set(P::SerieSortType, data && is_serie, !is_serie);
        set(
            P::AxisUseValues,
            !data && (inputs.is_numeric || inputs.is_datetime),
            serie != SerieDefinition::Axis,
        );

        // Navigation flags are edited outside the element editor
        set(P::DrillEnabled, false, false);
        set(P::SubReportsEnabled, false, false);

        policy
    }

    pub fn state(&self, property: ElementProperty) -> PropertyState {
        self.states.get(&property).copied().unwrap_or_default()
    }

    pub fn is_browsable(&self, property: ElementProperty) -> bool {
        self.state(property).browsable
    }

    pub fn is_read_only(&self, property: ElementProperty) -> bool {
        self.state(property).read_only
    }

    /// Guard for callers that edit through the policy.
    pub fn ensure_writable(&self, property: ElementProperty) -> Result<(), ElementError> {
        if self.is_read_only(property) {
            Err(ElementError::ReadOnlyProperty(property))
        } else {
            Ok(())
        }
    }

    /// Browsable properties in declaration order.
    pub fn browsable_properties(&self) -> Vec<ElementProperty> {
        ElementProperty::ALL
            .iter()
            .copied()
            .filter(|p| self.is_browsable(*p))
            .collect()
    }
}

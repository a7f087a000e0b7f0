//! FILENAME: core/element-engine/src/definition.rs
//! Report Element Definition - the closed vocabularies an element is built from.
//!
//! These types describe WHAT an element is configured to do:
//! - placement in the pivot (Page/Row/Column/Data)
//! - data options (aggregate, calculation option, totals)
//! - chart options (series role, series type, axes, series sorting)
//! - standard format presets and sort directives

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ElementError;

// ============================================================================
// PLACEMENT & TYPES
// ============================================================================

/// Which axis of the pivot table the element occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PivotPosition {
    Page,
    #[default]
    Row,
    Column,
    Data,
}

/// Declared data type of a column. `Default` on an element means "use the catalog's".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ColumnType {
    #[default]
    Default,
    Numeric,
    Text,
    DateTime,
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Aggregate functions applied to Data elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AggregateFunction {
    #[default]
    Sum,
    Count,
    CountDistinct,
    Min,
    Max,
    Average,
}

impl AggregateFunction {
    /// Label used when synthesizing "<label> of <column>" display names.
    pub fn label(&self) -> &'static str {
        match self {
            AggregateFunction::Sum => "Sum",
            AggregateFunction::Count => "Count",
            AggregateFunction::CountDistinct => "Count Distinct",
            AggregateFunction::Min => "Min",
            AggregateFunction::Max => "Max",
            AggregateFunction::Average => "Average",
        }
    }

    /// Wrap a column expression in the SQL aggregate.
    pub fn sql(&self, expression: &str) -> String {
        match self {
            AggregateFunction::Sum => format!("SUM({})", expression),
            AggregateFunction::Count => format!("COUNT({})", expression),
            AggregateFunction::CountDistinct => format!("COUNT(DISTINCT {})", expression),
            AggregateFunction::Min => format!("MIN({})", expression),
            AggregateFunction::Max => format!("MAX({})", expression),
            AggregateFunction::Average => format!("AVG({})", expression),
        }
    }
}

/// Calculation applied on a numeric Data element in the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalculationOption {
    #[default]
    No,
    PercentageOfColumn,
    PercentageOfRow,
    PercentageOfAll,
}

/// Where totals of a Data element are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShowTotal {
    #[default]
    No,
    Row,
    Column,
    RowColumn,
}

// ============================================================================
// CHART OPTIONS
// ============================================================================

/// How the element participates in chart series construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SerieDefinition {
    #[default]
    None,
    Axis,
    Splitter,
    SplitterBoth,
    Serie,
    #[serde(rename = "NVD3Serie")]
    Nvd3Serie,
    AlternateSerie,
}

impl SerieDefinition {
    /// Roles that define a series of values.
    pub fn is_serie(&self) -> bool {
        matches!(self, SerieDefinition::Serie | SerieDefinition::Nvd3Serie)
    }
}

/// Series chart type for the server-side chart control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SeriesChartType {
    #[default]
    Point,
    Line,
    Spline,
    Column,
    StackedColumn,
    Bar,
    StackedBar,
    Area,
    StackedArea,
    Pie,
    Doughnut,
}

/// Series type for the client-side chart library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Nvd3SerieType {
    #[default]
    ScatterChart,
    LineChart,
    LinePlusBarChart,
    MultiBarChart,
    MultiBarHorizontalChart,
    DiscreteBarChart,
    StackedAreaChart,
    PieChart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisType {
    #[default]
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointSortOrder {
    #[default]
    Ascending,
    Descending,
}

/// What a series is sorted on in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SerieSortType {
    None,
    X,
    #[default]
    Y,
}

// ============================================================================
// STANDARD FORMATS
// ============================================================================

/// Named numeric format presets. Every preset other than `Default` and
/// `Custom` maps to a native token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NumericStandardFormat {
    #[default]
    Default,
    Custom,
    Numeric0,
    Numeric1,
    Numeric2,
    Numeric3,
    Numeric4,
    Percentage0,
    Percentage1,
    Percentage2,
    Percentage3,
    Percentage4,
    Currency0,
    Currency1,
    Currency2,
    Currency3,
    Currency4,
}

impl NumericStandardFormat {
    pub fn token(&self) -> Option<&'static str> {
        match self {
            NumericStandardFormat::Default | NumericStandardFormat::Custom => None,
            NumericStandardFormat::Numeric0 => Some("N0"),
            NumericStandardFormat::Numeric1 => Some("N1"),
            NumericStandardFormat::Numeric2 => Some("N2"),
            NumericStandardFormat::Numeric3 => Some("N3"),
            NumericStandardFormat::Numeric4 => Some("N4"),
            NumericStandardFormat::Percentage0 => Some("P0"),
            NumericStandardFormat::Percentage1 => Some("P1"),
            NumericStandardFormat::Percentage2 => Some("P2"),
            NumericStandardFormat::Percentage3 => Some("P3"),
            NumericStandardFormat::Percentage4 => Some("P4"),
            NumericStandardFormat::Currency0 => Some("C0"),
            NumericStandardFormat::Currency1 => Some("C1"),
            NumericStandardFormat::Currency2 => Some("C2"),
            NumericStandardFormat::Currency3 => Some("C3"),
            NumericStandardFormat::Currency4 => Some("C4"),
        }
    }

    pub fn is_percentage(&self) -> bool {
        matches!(
            self,
            NumericStandardFormat::Percentage0
                | NumericStandardFormat::Percentage1
                | NumericStandardFormat::Percentage2
                | NumericStandardFormat::Percentage3
                | NumericStandardFormat::Percentage4
        )
    }
}

/// Named date/time format presets mapped to the native shorthand tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateTimeStandardFormat {
    #[default]
    Default,
    Custom,
    ShortDate,
    LongDate,
    ShortTime,
    LongTime,
    ShortDateShortTime,
    ShortDateLongTime,
    LongDateShortTime,
    LongDateLongTime,
}

impl DateTimeStandardFormat {
    pub fn token(&self) -> Option<&'static str> {
        match self {
            DateTimeStandardFormat::Default | DateTimeStandardFormat::Custom => None,
            DateTimeStandardFormat::ShortDate => Some("d"),
            DateTimeStandardFormat::LongDate => Some("D"),
            DateTimeStandardFormat::ShortTime => Some("t"),
            DateTimeStandardFormat::LongTime => Some("T"),
            DateTimeStandardFormat::ShortDateShortTime => Some("g"),
            DateTimeStandardFormat::ShortDateLongTime => Some("G"),
            DateTimeStandardFormat::LongDateShortTime => Some("f"),
            DateTimeStandardFormat::LongDateLongTime => Some("F"),
        }
    }
}

// ============================================================================
// SORT DIRECTIVE
// ============================================================================

/// Sort directive of an element. Explicit directives carry a rank; ranks are
/// compared across all elements of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum SortOrder {
    NotSorted,
    #[default]
    AutomaticAscending,
    AutomaticDescending,
    Ascending(u32),
    Descending(u32),
}

const NOT_SORTED: &str = "Not sorted";
const AUTOMATIC_ASCENDING: &str = "Automatic Ascending";
const AUTOMATIC_DESCENDING: &str = "Automatic Descending";

impl SortOrder {
    pub fn is_sorted(&self) -> bool {
        *self != SortOrder::NotSorted
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, SortOrder::AutomaticDescending | SortOrder::Descending(_))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::NotSorted => f.write_str(NOT_SORTED),
            SortOrder::AutomaticAscending => f.write_str(AUTOMATIC_ASCENDING),
            SortOrder::AutomaticDescending => f.write_str(AUTOMATIC_DESCENDING),
            SortOrder::Ascending(rank) => write!(f, "{} Ascending", rank),
            SortOrder::Descending(rank) => write!(f, "{} Descending", rank),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ElementError;

    /// Empty text means "not sorted".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_SORTED) {
            return Ok(SortOrder::NotSorted);
        }
        if trimmed.eq_ignore_ascii_case(AUTOMATIC_ASCENDING) {
            return Ok(SortOrder::AutomaticAscending);
        }
        if trimmed.eq_ignore_ascii_case(AUTOMATIC_DESCENDING) {
            return Ok(SortOrder::AutomaticDescending);
        }

        let invalid = || ElementError::InvalidSortOrder(s.to_string());
        let (rank, direction) = trimmed.split_once(' ').ok_or_else(invalid)?;
        let rank: u32 = rank.parse().map_err(|_| invalid())?;
        match direction.trim() {
            d if d.eq_ignore_ascii_case("Ascending") => Ok(SortOrder::Ascending(rank)),
            d if d.eq_ignore_ascii_case("Descending") => Ok(SortOrder::Descending(rank)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for SortOrder {
    type Error = ElementError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.to_string()
    }
}

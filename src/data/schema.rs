use std::fmt;

use crate::error::Error;

/// Export rows before this index are banner/header noise; the data block
/// starts at sheet row 12.
pub const LEADING_ROWS: usize = 11;

/// Column holding the Lipper fund identifier, required in every record.
pub const IDENTIFIER_COLUMN: &str = "理柏 ID";

/// Column holding the fund display name.
pub const NAME_COLUMN: &str = "名稱";

/// Rank metric columns, in the order thresholds are supplied by the caller.
pub const RANK_METRICS: [&str; 8] = [
    "1M排名", "3M排名", "6M排名", "1Y排名", "2Y排名", "3Y排名", "5Y排名", "10Y排名",
];

/// Marker shared by all rank-type columns (used for cosmetic integer
/// coercion of whole-number ranks).
pub const RANK_MARKER: &str = "排名";

// ---------------------------------------------------------------------------
// SheetCategory – domestic vs overseas export layouts
// ---------------------------------------------------------------------------

/// Which of the two export layouts a worksheet follows. Detected from the
/// worksheet name prefix; everything downstream (helper columns, schema
/// variants, classification column) branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetCategory {
    /// 境內 (TWD-denominated) sheet.
    Domestic,
    /// 境外 (USD-denominated) sheet.
    Overseas,
}

impl fmt::Display for SheetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetCategory::Domestic => write!(f, "domestic"),
            SheetCategory::Overseas => write!(f, "overseas"),
        }
    }
}

impl SheetCategory {
    /// Detect the category from a worksheet name such as `境內(TWD計價) -  `.
    pub fn from_sheet_name(name: &str) -> Result<Self, Error> {
        if name.starts_with("境內") {
            Ok(SheetCategory::Domestic)
        } else if name.starts_with("境外") {
            Ok(SheetCategory::Overseas)
        } else {
            Err(Error::UnknownCategory(name.to_string()))
        }
    }

    /// Column positions (absolute, zero-based) that are empty helper columns
    /// in this layout and must be dropped before schema resolution.
    pub fn helper_columns(self) -> &'static [usize] {
        match self {
            SheetCategory::Domestic => &[5, 6],
            SheetCategory::Overseas => &[0],
        }
    }

    /// The column carrying the classification label funds are grouped by.
    pub fn classification_column(self) -> &'static str {
        match self {
            SheetCategory::Domestic => "SITCA Domestic",
            SheetCategory::Overseas => "理柏環球分類",
        }
    }
}

// ---------------------------------------------------------------------------
// SchemaVariant – (category, column count) → semantic column names
// ---------------------------------------------------------------------------

/// Domestic export, 5Y/10Y metrics present.
const DOMESTIC_FULL: [&str; 24] = [
    "SITCA Domestic", "理柏 ID", "ISIN 代碼", "名稱", "基金貨幣",
    "1M", "1M排名", "3M", "3M排名", "6M", "6M排名", "1Y", "1Y排名",
    "2Y", "2Y排名", "3Y", "3Y排名", "5Y", "5Y排名", "10Y", "10Y排名",
    "波動度 1Y", "波動度 3Y", "波動度 4Y",
];

/// Domestic export, 5Y/10Y metrics absent.
const DOMESTIC_SHORT: [&str; 20] = [
    "SITCA Domestic", "理柏 ID", "ISIN 代碼", "名稱", "基金貨幣",
    "1M", "1M排名", "3M", "3M排名", "6M", "6M排名", "1Y", "1Y排名",
    "2Y", "2Y排名", "3Y", "3Y排名",
    "波動度 1Y", "波動度 3Y", "波動度 4Y",
];

/// Overseas export, 5Y/10Y metrics present.
const OVERSEAS_FULL: [&str; 25] = [
    "理柏環球分類", "理柏 ID", "ISIN 代碼", "名稱", "基金貨幣",
    "Aggregate Fund Value USD 日期", "Aggregate Fund Value USD 數值",
    "1M", "1M排名", "3M", "3M排名", "6M", "6M排名", "1Y", "1Y排名",
    "2Y", "2Y排名", "3Y", "3Y排名", "5Y", "5Y排名", "10Y", "10Y排名",
    "波動度 1Y", "波動度 3Y",
];

/// Overseas export, 5Y/10Y absent, trailing secondary identifier instead.
const OVERSEAS_SHORT: [&str; 22] = [
    "理柏環球分類", "理柏 ID", "ISIN 代碼", "名稱", "基金貨幣",
    "Aggregate Fund Value USD 日期", "Aggregate Fund Value USD 數值",
    "1M", "1M排名", "3M", "3M排名", "6M", "6M排名", "1Y", "1Y排名",
    "2Y", "2Y排名", "3Y", "3Y排名",
    "波動度 1Y", "波動度 3Y", "理柏ID",
];

/// One of the known column-name mappings. Exports silently vary their column
/// count between periods, so resolution is an exact lookup on
/// (category, count) and anything else is an error, never a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    DomesticFull,
    DomesticShort,
    OverseasFull,
    OverseasShort,
}

impl SchemaVariant {
    /// Resolve the variant for an observed column count.
    pub fn resolve(category: SheetCategory, column_count: usize) -> Result<Self, Error> {
        match (category, column_count) {
            (SheetCategory::Domestic, 24) => Ok(SchemaVariant::DomesticFull),
            (SheetCategory::Domestic, 20) => Ok(SchemaVariant::DomesticShort),
            (SheetCategory::Overseas, 25) => Ok(SchemaVariant::OverseasFull),
            (SheetCategory::Overseas, 22) => Ok(SchemaVariant::OverseasShort),
            (category, count) => Err(Error::UnrecognizedSchema { category, count }),
        }
    }

    /// Ordered semantic column names for this variant.
    pub fn column_names(self) -> &'static [&'static str] {
        match self {
            SchemaVariant::DomesticFull => &DOMESTIC_FULL,
            SchemaVariant::DomesticShort => &DOMESTIC_SHORT,
            SchemaVariant::OverseasFull => &OVERSEAS_FULL,
            SchemaVariant::OverseasShort => &OVERSEAS_SHORT,
        }
    }
}

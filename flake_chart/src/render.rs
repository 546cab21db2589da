use std::cmp::Ordering;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    defaults::{CHART_CONTAINER_ID, TABLESORT_NUMBER_SCRIPT_URL, TABLESORT_SCRIPT_URL},
    endpoint::View,
    error::DashboardError,
    page::{Element, Page},
};

/// One test's recent flakiness and its trend versus the previous 15 days.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlakeTableRow {
    pub test_name: String,
    pub recent_flake_percentage: f64,
    pub growth_rate: f64,
}

/// Payload of the environment endpoint. Rows arrive already ranked.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentChartData {
    pub recent_flake_percent_table: Vec<FlakeTableRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Default,
    Left,
    Center,
    Right,
}

impl Alignment {
    fn css(self) -> Option<&'static str> {
        match self {
            Alignment::Default => None,
            Alignment::Left => Some("left"),
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
        }
    }
}

/// Colour of a growth rate: red for growth, green for decline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthColor {
    Red,
    Green,
    Black,
}

impl GrowthColor {
    pub fn of(growth_rate: f64) -> GrowthColor {
        if growth_rate > 0.0 {
            GrowthColor::Red
        } else if growth_rate < 0.0 {
            GrowthColor::Green
        } else {
            GrowthColor::Black
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            GrowthColor::Red => "red",
            GrowthColor::Green => "green",
            GrowthColor::Black => "black",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub alignment: Alignment,
    pub color: Option<GrowthColor>,
    /// Value the cell sorts by when it holds a number.
    pub sort_key: Option<f64>,
}

impl TableCell {
    fn text(text: String) -> TableCell {
        TableCell {
            text,
            alignment: Alignment::Default,
            color: None,
            sort_key: None,
        }
    }

    fn aligned(mut self, alignment: Alignment) -> TableCell {
        self.alignment = alignment;
        self
    }

    fn numeric(mut self, value: f64) -> TableCell {
        self.sort_key = Some(value);
        self
    }
}

pub type TableRow = Vec<TableCell>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Header labels of the flake table.
pub const FLAKE_TABLE_HEADER: [&str; 4] = [
    "Rank",
    "Test Name",
    "Recent Flake Percentage",
    "Growth (since last 15 days)",
];

/// A header row followed by body rows, sortable by any column.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTable {
    pub header: TableRow,
    pub rows: Vec<TableRow>,
}

impl RenderedTable {
    /// Text of one column, top to bottom.
    pub fn column(&self, index: usize) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).map(|cell| cell.text.as_str()))
            .collect()
    }

    /// Reorder the body rows by a column. Numeric cells compare by value,
    /// others by text. Rows that compare equal keep their relative order.
    pub fn sort_by_column(&mut self, index: usize, direction: SortDirection) {
        self.rows.sort_by(|a, b| {
            let ordering = match (a.get(index), b.get(index)) {
                (Some(a), Some(b)) => compare_cells(a, b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    pub fn to_element(&self) -> Element {
        let header = self
            .header
            .iter()
            .fold(Element::new("tr"), |tr, cell| {
                tr.with_child(cell_element("th", cell))
            });
        let body = self.rows.iter().fold(Element::new("tbody"), |tbody, row| {
            tbody.with_child(
                row.iter()
                    .fold(Element::new("tr"), |tr, cell| tr.with_child(cell_element("td", cell))),
            )
        });
        Element::new("table")
            .with_class("sortable")
            .with_child(header)
            .with_child(body)
    }
}

fn compare_cells(a: &TableCell, b: &TableCell) -> Ordering {
    match (a.sort_key, b.sort_key) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => a.text.cmp(&b.text),
    }
}

fn cell_element(tag: &str, cell: &TableCell) -> Element {
    let mut element = Element::new(tag);
    if let Some(align) = cell.alignment.css() {
        element.set_style("text-align", align);
    }
    match cell.color {
        Some(color) => element.with_child(
            Element::new("span")
                .with_style("color", color.css())
                .with_text(&cell.text),
        ),
        None => element.with_text(&cell.text),
    }
}

/// Format a growth rate with an explicit sign for growth.
pub fn format_growth_rate(growth_rate: f64) -> String {
    if growth_rate > 0.0 {
        format!("+{}%", growth_rate)
    } else if growth_rate < 0.0 {
        format!("{}%", growth_rate)
    } else {
        "0%".to_string()
    }
}

/// Build the ranked flake table. Rank is the position in `rows`.
pub fn build_flake_table(rows: &[FlakeTableRow]) -> RenderedTable {
    let mut header: TableRow = FLAKE_TABLE_HEADER
        .iter()
        .map(|label| TableCell::text(label.to_string()))
        .collect();
    header[1].alignment = Alignment::Left;

    let rows = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let rank = i + 1;
            vec![
                TableCell::text(rank.to_string())
                    .aligned(Alignment::Center)
                    .numeric(rank as f64),
                TableCell::text(row.test_name.clone()),
                TableCell::text(format!("{}%", row.recent_flake_percentage))
                    .aligned(Alignment::Right)
                    .numeric(row.recent_flake_percentage),
                TableCell {
                    color: Some(GrowthColor::of(row.growth_rate)),
                    ..TableCell::text(format_growth_rate(row.growth_rate)).numeric(row.growth_rate)
                },
            ]
        })
        .collect();

    RenderedTable { header, rows }
}

fn enable_table_sort(page: &mut Page) {
    page.add_head_asset(&format!(
        "<script src=\"{}\"></script>",
        TABLESORT_SCRIPT_URL
    ));
    page.add_head_asset(&format!(
        "<script src=\"{}\"></script>",
        TABLESORT_NUMBER_SCRIPT_URL
    ));
    page.add_script("document.querySelectorAll('table.sortable').forEach(t => new Tablesort(t));");
}

fn display_environment_chart(data: &Value, page: &mut Page) -> Result<(), DashboardError> {
    let data = EnvironmentChartData::deserialize(data)?;
    let table = build_flake_table(&data.recent_flake_percent_table);
    log::info!("Rendering flake table with {} rows", table.rows.len());

    let container = page
        .element_by_id_mut(CHART_CONTAINER_ID)
        .ok_or_else(missing_container)?;
    container.append_child(table.to_element());
    enable_table_sort(page);
    Ok(())
}

fn missing_container() -> DashboardError {
    DashboardError::MissingContainer(CHART_CONTAINER_ID.to_string())
}

fn display_test_and_environment_chart(_data: &Value, _page: &mut Page) -> Result<(), DashboardError> {
    log::info!("The test and environment view does not render anything yet");
    Ok(())
}

/// Render the fetched data into the page's chart container.
///
/// Rendering twice appends twice; clear the page first when that is not
/// wanted.
pub fn render(view: View, data: &Value, page: &mut Page) -> Result<(), DashboardError> {
    match view {
        View::Environment => display_environment_chart(data, page),
        View::TestAndEnvironment => display_test_and_environment_chart(data, page),
    }
}

//! ECharts visualisations for the dashboard.
//!
//! - **Expenses by type**: pie chart of the selected month's fixed expenses.
//! - **Expense history**: fixed expenses against market purchases for the
//!   six months ending at the selected month.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::dashboard::aggregation::{CategoryTotal, MonthlyTotals};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the chart containers followed by the script that fills them.
///
/// The script runs inline rather than on `DOMContentLoaded` so that it also
/// works when the dashboard content is swapped in by HTMX.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded bg-white dark:bg-gray-100"
                    {}
                }
            }
        }

        script { (charts_script(charts)) }
    )
}

fn charts_script(charts: &[DashboardChart]) -> PreEscaped<String> {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom || typeof echarts === 'undefined') {{
                        return;
                    }}
                    const isDarkMode = window.matchMedia('(prefers-color-scheme: dark)').matches;
                    const chart = echarts.init(chartDom, isDarkMode ? 'dark' : null);
                    const option = {};
                    chart.setOption(option);
                    window.dashboardCharts["{}"] = chart;
                }})();"#,
                chart.id, chart.options, chart.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    // Chart labels come from user data, so keep them from closing the script tag.
    let script_content = script_content.replace("</", "<\\/");

    PreEscaped(format!(
        r#"window.dashboardCharts = window.dashboardCharts || {{}};
        if (!window.dashboardChartsResizeListener) {{
            window.dashboardChartsResizeListener = () =>
                Object.values(window.dashboardCharts).forEach((chart) => chart.resize());
            window.addEventListener('resize', window.dashboardChartsResizeListener);
        }}
        {script_content}"#
    ))
}

pub(super) fn expenses_by_type_chart(breakdown: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = breakdown
        .iter()
        .map(|category| (category.total, category.label.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expenses by Type")
                .subtext("Fixed expenses this month"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Fixed expenses")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

pub(super) fn expense_history_chart(series: &[MonthlyTotals]) -> Chart {
    let labels: Vec<String> = series
        .iter()
        .map(|totals| totals.month.short_label().to_owned())
        .collect();
    let fixed_expenses: Vec<f64> = series.iter().map(|totals| totals.fixed_expenses).collect();
    let market_purchases: Vec<f64> = series
        .iter()
        .map(|totals| totals.market_purchases)
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Expense History")
                .subtext("Last six months"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().top("bottom"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("10%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Fixed Expenses").data(fixed_expenses))
        .series(bar::Bar::new().name("Market Purchases").data(market_purchases))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'BRL'
            });
            return (number == null) ? \"-\" : currencyFormatter.format(number);",
    )
}

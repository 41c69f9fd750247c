use std::fs::File;
use std::io::Write;

use log::info;
use prettytable::{row, Table};
use serde::Deserialize;

use crate::report::summary::{ScheduleReport, UtilizationStats};

#[derive(Debug, Default, Deserialize, PartialEq, Clone)]
pub enum ReportFormat {
    #[default]
    JSON,
    PrettyTable,
    /// Human readable summary through the log facade, one entry per bin.
    Log,
}

#[derive(Debug, Default, Deserialize, PartialEq, Clone)]
pub struct ReportPrinterConfig {
    #[serde(default)]
    pub format: ReportFormat,
    /// If not set the report goes to stdout.
    pub output_file: Option<std::path::PathBuf>,
}

pub fn print_report(report: &ScheduleReport, config: &ReportPrinterConfig) -> std::io::Result<()> {
    let mut output: Box<dyn Write> = match &config.output_file {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    match config.format {
        ReportFormat::PrettyTable => print_report_as_pretty_table(report, &mut output),
        ReportFormat::JSON => print_report_as_json(report, &mut output),
        ReportFormat::Log => {
            log_report(report);
            Ok(())
        }
    }
}

fn format_stats(stats: &Option<UtilizationStats>) -> String {
    match stats {
        Some(s) => format!("{:.2} / {:.2} / {:.2}", s.min, s.max, s.mean),
        None => "-".to_string(),
    }
}

pub fn print_report_as_pretty_table<W: Write>(
    report: &ScheduleReport,
    output: &mut W,
) -> std::io::Result<()> {
    let mut aggregated_table = Table::new();
    aggregated_table.add_row(row!["Metric", "Value"]);
    aggregated_table.add_row(row!["Created bins", report.created_bins]);
    aggregated_table.add_row(row!["Reused bins", report.reused_bins]);
    aggregated_table.add_row(row!["Placed workloads", report.placed_workloads]);
    aggregated_table.add_row(row!["Total hourly cost", format!("{:.6}", report.total_cost)]);
    aggregated_table.add_row(row![
        "CPU utilization % (min / max / mean)",
        format_stats(&report.cpu_utilization)
    ]);
    aggregated_table.add_row(row![
        "Memory utilization % (min / max / mean)",
        format_stats(&report.memory_utilization)
    ]);

    let mut bins_table = Table::new();
    bins_table.add_row(row![
        "Bin", "Type", "Origin", "Price", "CPU", "Memory (GiB)", "CPU %", "Memory %", "Workloads"
    ]);
    for bin in report.bins.iter() {
        bins_table.add_row(row![
            bin.name,
            bin.node_type,
            format!("{:?}", bin.origin),
            format!("{:.6}", bin.hourly_price),
            format!("{} / {}", bin.occupied.cpu, bin.capacity.cpu),
            format!("{} / {}", bin.occupied.memory, bin.capacity.memory),
            format!("{:.2}", bin.cpu_utilization),
            format!("{:.2}", bin.memory_utilization),
            bin.workloads
                .iter()
                .map(|w| w.name.as_str())
                .collect::<Vec<&str>>()
                .join(", ")
        ]);
    }

    aggregated_table.print(output)?;
    bins_table.print(output)?;
    Ok(())
}

pub fn print_report_as_json<W: Write>(report: &ScheduleReport, output: &mut W) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *output, report)?;
    writeln!(output)
}

pub fn log_report(report: &ScheduleReport) {
    for (idx, bin) in report.bins.iter().enumerate() {
        let workloads: Vec<(f64, f64)> = bin
            .workloads
            .iter()
            .map(|w| (w.requests.cpu, w.requests.memory))
            .collect();
        info!(
            "Bin {} {:?} ({:?}): type {}, price {}, {} vCPU and {} GiB RAM\n\t workloads {:?}\n\t occupied {} CPU, {} GiB memory\n\t CPU utilization {:.2}%, memory utilization {:.2}%",
            idx + 1,
            bin.name,
            bin.origin,
            bin.node_type,
            bin.hourly_price,
            bin.capacity.cpu,
            bin.capacity.memory,
            workloads,
            bin.occupied.cpu,
            bin.occupied.memory,
            bin.cpu_utilization,
            bin.memory_utilization
        );
    }
    info!("Total hourly cost of created bins is {}", report.total_cost);
}

#[cfg(test)]
mod tests {
    use super::{print_report_as_json, print_report_as_pretty_table};
    use crate::core::bin::Bin;
    use crate::core::node_type::NodeType;
    use crate::core::schedule::Schedule;
    use crate::core::workload::Workload;
    use crate::report::summary::summarize;

    fn report() -> crate::report::summary::ScheduleReport {
        let mut bin = Bin::created(NodeType::new("e2-medium".to_string(), 2.0, 4.0, 0.03), 1);
        bin.assign(Workload::new("pod_a".to_string(), 1.0, 2.0).unwrap());
        summarize(&Schedule { bins: vec![bin] }).unwrap()
    }

    #[test]
    fn test_json_output_is_parseable() {
        let mut buffer: Vec<u8> = vec![];
        print_report_as_json(&report(), &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["created_bins"], 1);
        assert_eq!(value["bins"][0]["name"], "e2-medium_1");
        assert_eq!(value["bins"][0]["origin"], "Created");
    }

    #[test]
    fn test_pretty_table_lists_bins() {
        let mut buffer: Vec<u8> = vec![];
        print_report_as_pretty_table(&report(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("e2-medium_1"));
        assert!(text.contains("pod_a"));
        assert!(text.contains("Total hourly cost"));
    }
}

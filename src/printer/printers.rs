// src/printer/printers.rs

//! Specialized printer struct [`RecordPrinter`] and helper functions for
//! rendering [`Record`s] as tab-separated text or semicolon-separated CSV,
//! printed to the console or appended to a file.
//!
//! [`RecordPrinter`]: self::RecordPrinter
//! [`Record`s]: crate::data::record::Record

use std::fs::File;
use std::io::{
    BufWriter,
    Result,
    Write, // for `flush`
};
use std::path::Path;

#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};
use ::termcolor::StandardStream;
#[doc(hidden)]
pub use ::termcolor::{
    Color,
    ColorChoice,
    ColorSpec,
    WriteColor,
};

use crate::common::{
    FPath,
    FileOpenOptions,
    OutputMode,
};
use crate::data::record::Record;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Header line preceding text-rendered records.
pub const HEADER_TEXT: &str = "time created\tlog\tid\tsource\tlevel\tdescription";

/// Header line preceding CSV-rendered records.
pub const HEADER_CSV: &str = "\"time created\";\"log\";\"id\";\"source\";\"level\";\"description\"";

/// [`Color`] for severities `"Critical"` and `"Error"`.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_SEVERITY_ERROR: Color = Color::Red;

/// [`Color`] for severity `"Warning"`.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_SEVERITY_WARNING: Color = Color::Yellow;

/// [`Color`] for severity `"Information"`.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_SEVERITY_INFORMATION: Color = Color::Green;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// row formatting helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The [`Color`] drawing attention to `severity`, `None` for severities
/// printed plain.
pub fn severity_color(severity: &str) -> Option<Color> {
    match severity {
        "Critical" | "Error" => Some(COLOR_SEVERITY_ERROR),
        "Warning" => Some(COLOR_SEVERITY_WARNING),
        "Information" => Some(COLOR_SEVERITY_INFORMATION),
        _ => None,
    }
}

/// One record as a tab-separated text row. Newlines embedded in the body
/// gain a following tab so continuation lines stay visually under the row.
pub fn format_text_row(record: &Record) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        record.dt_display(),
        record.source(),
        record.id(),
        record.origin(),
        record.severity(),
        record
            .body()
            .replace('\n', "\n\t"),
    )
}

/// One record as a semicolon-separated CSV row. Every field but the id is
/// double-quoted; a `"` embedded in the body doubles.
pub fn format_csv_row(record: &Record) -> String {
    format!(
        "\"{}\";\"{}\";{};\"{}\";\"{}\";\"{}\"",
        record.dt_display(),
        record.source(),
        record.id(),
        record.origin(),
        record.severity(),
        record
            .body()
            .replace('"', "\"\""),
    )
}

/// The header line preceding rendered records.
///
/// Every rendering but text uses the CSV shape; a grid rendering sent to a
/// file falls back to CSV, there is no interactive display inside a file.
pub const fn header_for(mode: OutputMode) -> &'static str {
    match mode {
        OutputMode::Text => HEADER_TEXT,
        OutputMode::Csv | OutputMode::Grid => HEADER_CSV,
    }
}

/// One record as a row of the rendering `mode`; see [`header_for`] about
/// grid renderings.
pub fn format_row(
    record: &Record,
    mode: OutputMode,
) -> String {
    match mode {
        OutputMode::Text => format_text_row(record),
        OutputMode::Csv | OutputMode::Grid => format_csv_row(record),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RecordPrinter
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A printer of the merged record stream to _stdout_.
///
/// Text rows color the severity field by level. CSV rows print plain so
/// the output stays machine-readable.
pub struct RecordPrinter {
    /// termcolor handle to stdout
    stdout_color: StandardStream,
    /// should printing be in color?
    do_color: bool,
    /// rendering selected for this run
    mode: OutputMode,
    /// color settings for severities `"Critical"` and `"Error"`
    color_spec_error: ColorSpec,
    /// color settings for severity `"Warning"`
    color_spec_warning: ColorSpec,
    /// color settings for severity `"Information"`
    color_spec_information: ColorSpec,
}

impl RecordPrinter {
    /// Create a new `RecordPrinter`.
    pub fn new(
        color_choice: ColorChoice,
        mode: OutputMode,
    ) -> RecordPrinter {
        // get a stdout handle once
        let stdout_color = StandardStream::stdout(color_choice);
        let do_color: bool = match color_choice {
            ColorChoice::Never => false,
            ColorChoice::Always | ColorChoice::AlwaysAnsi | ColorChoice::Auto => true,
        };
        let mut color_spec_error: ColorSpec = ColorSpec::new();
        color_spec_error.set_fg(Some(COLOR_SEVERITY_ERROR));
        let mut color_spec_warning: ColorSpec = ColorSpec::new();
        color_spec_warning.set_fg(Some(COLOR_SEVERITY_WARNING));
        let mut color_spec_information: ColorSpec = ColorSpec::new();
        color_spec_information.set_fg(Some(COLOR_SEVERITY_INFORMATION));

        RecordPrinter {
            stdout_color,
            do_color,
            mode,
            color_spec_error,
            color_spec_warning,
            color_spec_information,
        }
    }

    /// The color settings for `severity`, `None` for severities printed
    /// plain.
    fn severity_spec(
        &self,
        severity: &str,
    ) -> Option<&ColorSpec> {
        match severity {
            "Critical" | "Error" => Some(&self.color_spec_error),
            "Warning" => Some(&self.color_spec_warning),
            "Information" => Some(&self.color_spec_information),
            _ => None,
        }
    }

    /// Print the header line for the selected rendering.
    pub fn print_header(&mut self) -> Result<()> {
        writeln!(self.stdout_color, "{}", header_for(self.mode))
    }

    /// Print one record as a row of the selected rendering.
    pub fn print_record(
        &mut self,
        record: &Record,
    ) -> Result<()> {
        match self.mode {
            OutputMode::Text if self.do_color => self.print_text_row_color(record),
            _ => writeln!(self.stdout_color, "{}", format_row(record, self.mode)),
        }
    }

    /// Print a text row with the severity field in its severity's color.
    fn print_text_row_color(
        &mut self,
        record: &Record,
    ) -> Result<()> {
        write!(
            self.stdout_color,
            "{}\t{}\t{}\t{}\t",
            record.dt_display(),
            record.source(),
            record.id(),
            record.origin(),
        )?;
        match self.severity_spec(record.severity()) {
            Some(color_spec) => {
                // only the severity field changes color; `set_color` calls
                // surround it tightly so a failed write cannot leave the
                // console colored
                let color_spec: ColorSpec = color_spec.clone();
                self.stdout_color
                    .set_color(&color_spec)?;
                write!(self.stdout_color, "{}", record.severity())?;
                self.stdout_color.reset()?;
            }
            None => {
                write!(self.stdout_color, "{}", record.severity())?;
            }
        }
        writeln!(
            self.stdout_color,
            "\t{}",
            record
                .body()
                .replace('\n', "\n\t"),
        )
    }

    /// Print the header then every record, then flush.
    pub fn print_records(
        &mut self,
        records: &[Record],
    ) -> Result<()> {
        defn!("({} records)", records.len());
        self.print_header()?;
        for record in records.iter() {
            self.print_record(record)?;
        }
        defx!();
        self.stdout_color.flush()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file output
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Append the records, rendered per `mode`, to the file at `path`.
///
/// The header is written only when the file did not already exist, so
/// repeated runs appending to one file accumulate one continuous table.
pub fn write_records_to_file(
    path: &FPath,
    records: &[Record],
    mode: OutputMode,
) -> Result<()> {
    defn!("({:?}, {} records)", path, records.len());
    let write_header: bool = !Path::new(path).exists();
    let mut open_options = FileOpenOptions::new();
    defo!("open_options.append(true).create(true).open({:?})", path);
    let file: File = open_options
        .append(true)
        .create(true)
        .open(Path::new(path))?;
    let mut writer: BufWriter<File> = BufWriter::new(file);
    if write_header {
        writeln!(writer, "{}", header_for(mode))?;
    }
    for record in records.iter() {
        writeln!(writer, "{}", format_row(record, mode))?;
    }
    writer.flush()?;
    defx!();

    Result::Ok(())
}

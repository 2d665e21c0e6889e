// src/output.rs
use crate::error::{OutputContext, Result};
use crate::types::{OutputConfig, OutputFormat, OUTPUT_PREFIX};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct OutputManager {
    config: OutputConfig,
    silent: bool,
}

impl OutputManager {
    pub fn new(config: OutputConfig, silent: bool) -> Self {
        Self { config, silent }
    }

    /// `ssl-tool-<domain>.<ext>` inside the output directory.
    pub fn output_path(&self, domain: &str, format: OutputFormat) -> PathBuf {
        self.config
            .directory
            .join(format!("{}-{}.{}", OUTPUT_PREFIX, domain, format.extension()))
    }

    /// Write one file per requested format, stopping at the first failure.
    pub fn write_all(&self, domain: &str, hosts: &[String]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.config.formats.len());

        for format in self.config.formats.iter() {
            let path = self.output_path(domain, format);
            self.write_to_file(&path, format, domain, hosts)?;
            written.push(path);
        }

        Ok(written)
    }

    pub fn write_to_file(&self, path: &Path, format: OutputFormat, domain: &str, hosts: &[String]) -> Result<()> {
        let file = File::create(path).with_path(path)?;
        let mut writer = BufWriter::new(file);

        write_output(&mut writer, format, domain, hosts).with_path(path)?;
        writer.flush().with_path(path)?;

        if !self.silent {
            println!("Output saved to {}", path.display());
        }
        Ok(())
    }
}

pub fn write_output<W: Write>(writer: &mut W, format: OutputFormat, domain: &str, hosts: &[String]) -> std::io::Result<()> {
    match format {
        OutputFormat::Json => write_json_output(writer, hosts),
        OutputFormat::Txt => write_text_output(writer, hosts),
        OutputFormat::Html => write_html_output(writer, domain, hosts),
    }
}

fn write_json_output<W: Write>(writer: &mut W, hosts: &[String]) -> std::io::Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    hosts.serialize(&mut serializer)?;
    Ok(())
}

fn write_text_output<W: Write>(writer: &mut W, hosts: &[String]) -> std::io::Result<()> {
    for host in hosts {
        writeln!(writer, "{}", host)?;
    }
    Ok(())
}

fn write_html_output<W: Write>(writer: &mut W, domain: &str, hosts: &[String]) -> std::io::Result<()> {
    let domain = html_escape::encode_text(domain);

    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html>")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "<title>Subdomains for {}</title>", domain)?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;
    writeln!(writer, "<h1>Subdomains for {}</h1>", domain)?;
    writeln!(writer, "<ul>")?;
    for host in hosts {
        writeln!(
            writer,
            "<li><a href=\"http://{}\" target=\"_blank\">{}</a></li>",
            html_escape::encode_double_quoted_attribute(host),
            html_escape::encode_text(host)
        )?;
    }
    writeln!(writer, "</ul>")?;
    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;
    Ok(())
}

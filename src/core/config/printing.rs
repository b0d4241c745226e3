use std::io::{self, Write};

use crate::core::config::data::Config;

fn show(value: Option<&str>, default: &str) -> String {
    match value {
        Some(value) => value.to_string(),
        None => format!("{default} (default)"),
    }
}

impl Config {
    pub fn print_all(&self) {
        let stdout = io::stdout();
        let _ = self.write_all(&mut stdout.lock());
    }

    pub fn write_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let server = &self.server;
        let port = server.port.map(|p| p.to_string());
        let default_port = server.port().to_string();

        writeln!(out, "Current configuration:")?;
        writeln!(out, "  endpoint: {}", show(self.endpoint.as_deref(), self.endpoint()))?;
        writeln!(out, "  server.host: {}", show(server.host.as_deref(), server.host()))?;
        writeln!(out, "  server.port: {}", show(port.as_deref(), &default_port))?;
        writeln!(
            out,
            "  server.base-url: {}",
            show(server.base_url.as_deref(), server.base_url())
        )?;
        writeln!(out, "  server.model: {}", show(server.model.as_deref(), server.model()))?;
        writeln!(
            out,
            "  server.system-prompt: {}",
            show(server.system_prompt.as_deref(), server.system_prompt())
        )?;
        Ok(())
    }
}

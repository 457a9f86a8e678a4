use anyhow::{Context, Result};
use propsat_rs::Valuation;
use std::io::{BufWriter, StdoutLock, Write};

/// Writes valuations as `v` lines: each variable is preceded by a sign slot, which contains `-` when it is false.
pub(crate) struct ModelWriter<W>
where
    W: Write,
{
    variables: Vec<String>,
    pattern: Vec<u8>,
    sign_location: Vec<usize>,
    buf: BufWriter<W>,
    n_models: u128,
    do_not_print: bool,
}

impl ModelWriter<StdoutLock<'static>> {
    pub fn new_locked(variables: &[String], do_not_print: bool) -> Self {
        ModelWriter::new(
            variables,
            do_not_print,
            BufWriter::with_capacity(128 * 1024, std::io::stdout().lock()),
        )
    }
}

impl<W> ModelWriter<W>
where
    W: Write,
{
    fn new(variables: &[String], do_not_print: bool, buf: BufWriter<W>) -> Self {
        let mut sign_location = Vec::with_capacity(variables.len());
        let mut pattern = Vec::new();
        pattern.push(b'v');
        for v in variables {
            pattern.push(b' ');
            sign_location.push(pattern.len());
            pattern.push(b' ');
            pattern.extend_from_slice(v.as_bytes());
        }
        pattern.push(b'\n');
        Self {
            variables: variables.to_vec(),
            pattern,
            sign_location,
            buf,
            n_models: 0,
            do_not_print,
        }
    }

    pub fn write_model(&mut self, model: &Valuation) -> Result<()> {
        self.n_models += 1;
        if self.do_not_print {
            return Ok(());
        }
        for (v, o) in self.variables.iter().zip(self.sign_location.iter()) {
            self.pattern[*o] = if model.get(v).unwrap_or_default() {
                b' '
            } else {
                b'-'
            };
        }
        self.buf
            .write_all(&self.pattern)
            .context("while writing a model")
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.buf, "{line}").context("while writing the output")
    }

    pub fn finalize(&mut self) -> Result<()> {
        self.buf.flush().context("while flushing the output")
    }

    pub fn n_models(&self) -> u128 {
        self.n_models
    }
}

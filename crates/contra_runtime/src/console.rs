use std::io::{self, Read, Write};

/// Standard input and output as seen by console capabilities.
pub struct Console {
    input: Box<dyn Read + Send>,
    output: Box<dyn Write + Send>,
}

impl Console {
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }

    pub fn new(input: impl Read + Send + 'static, output: impl Write + Send + 'static) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    pub(crate) fn read_all(&mut self) -> io::Result<String> {
        let mut buffer = String::new();
        self.input.read_to_string(&mut buffer)?;
        Ok(buffer)
    }

    pub(crate) fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }
}

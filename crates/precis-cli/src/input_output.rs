use std::{
    fs::{self, File},
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
};

/// Input text argument group.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// The text to process; `-` reads stdin.
    body: Option<String>,

    /// Read the text from a file.
    #[arg(long, conflicts_with = "body")]
    input: Option<PathBuf>,
}

impl InputArgs {
    /// Read the text from the positional argument, `--input`, or stdin.
    pub fn read_body(&self) -> Result<String, Box<dyn std::error::Error>> {
        if let Some(path) = &self.input {
            log::debug!("input: {}", path.display());
            return Ok(fs::read_to_string(path)?);
        }
        match self.body.as_deref() {
            Some("-") => {
                let mut body = String::new();
                io::stdin().read_to_string(&mut body)?;
                Ok(body)
            }
            Some(body) => Ok(body.to_string()),
            None => Err("no input text; pass it as an argument, with --input, or `-` for stdin".into()),
        }
    }
}

/// Output argument group.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Write the result to a file instead of stdout.
    #[arg(short, long, default_value = None)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    /// Open the output.
    pub fn open_writer(&self) -> Result<Box<dyn Write>, Box<dyn std::error::Error>> {
        Ok(match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        })
    }

    /// Write `text` and a newline to the output.
    pub fn write_line(
        &self,
        text: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut writer = self.open_writer()?;
        writeln!(writer, "{text}")?;
        writer.flush()?;
        Ok(())
    }
}

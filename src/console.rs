use std::io::{self, BufRead, Write};

/// Terminal the running program talks to.
pub trait Console {
    /// Rest of the current input line, or the next one, without its terminator;
    /// `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
    /// Next whitespace-separated token, crossing blank lines; `None` at end of input.
    fn read_token(&mut self) -> io::Result<Option<String>>;
    fn write_line(&mut self, text: &str) -> io::Result<()>;
}

/// Console over any buffered reader and writer.
pub struct StreamConsole<R, W> {
    input: R,
    output: W,
    rest: Option<String>, // unread tail of a line a token was taken from
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            rest: None,
        }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W> StreamConsole<R, W> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl StreamConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.rest.take() {
            Some(rest) => Ok(Some(rest)),
            None => self.next_line(),
        }
    }

    fn read_token(&mut self) -> io::Result<Option<String>> {
        loop {
            let line = match self.rest.take() {
                Some(rest) => rest,
                None => match self.next_line()? {
                    Some(line) => line,
                    None => return Ok(None),
                },
            };
            let text = line.trim_start();
            if text.is_empty() {
                continue;
            }
            let end = text.find(char::is_whitespace).unwrap_or(text.len());
            let (token, tail) = text.split_at(end);
            // A tail of nothing but blanks ends the line.
            if !tail.trim().is_empty() {
                self.rest = Some(tail.to_string());
            }
            return Ok(Some(token.to_string()));
        }
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }
}

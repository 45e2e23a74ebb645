#[derive(Debug, Copy, Clone, PartialOrd, Ord, PartialEq, Eq)]
pub enum PrintLevel {
    Verbose,
    Normal,
}

/// Level-gated stdout output. Messages are built lazily so muted or
/// filtered lines cost nothing but the closure.
#[derive(Debug)]
pub struct Shell {
    level: Option<PrintLevel>,
}

impl Shell {
    pub fn new(level: PrintLevel) -> Self {
        Self { level: Some(level) }
    }

    #[allow(unused)] // useful for tests
    pub fn muted() -> Self {
        Self { level: None }
    }

    /// Prints at normal level, the one-line-per-action output.
    pub fn status(&mut self, func: impl FnOnce() -> String) {
        self.println(PrintLevel::Normal, func);
    }

    /// Prints only when the shell runs verbose.
    pub fn verbose(&mut self, func: impl FnOnce() -> String) {
        self.println(PrintLevel::Verbose, func);
    }

    fn println(&mut self, level: PrintLevel, func: impl FnOnce() -> String) {
        if !self.should_print(level) {
            return;
        }

        println!("{}", func());
    }

    fn should_print(&self, level: PrintLevel) -> bool {
        self.level.map(|lvl| level >= lvl).unwrap_or(false)
    }
}

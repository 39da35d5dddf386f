// Define the global arguments
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    // attempts per request
    pub retries: u32,
    // max concurrent requests
    pub number: usize,
    // don't report every uploaded/removed object
    pub quiet: bool,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalArgs {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            retries: 3,
            number: 4,
            quiet: false,
        }
    }

    pub fn set_retries(&mut self, retries: u8) {
        self.retries = u32::from(retries.max(1));
    }

    pub fn set_number(&mut self, number: u8) {
        self.number = usize::from(number.max(1));
    }
}

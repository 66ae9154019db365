/// Maps a MAC address to the manufacturer that registered its prefix.
pub trait VendorRepository: Send + Sync {
    fn get_vendor(&self, mac: &str) -> Option<String>;
}

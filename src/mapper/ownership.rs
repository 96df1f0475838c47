//! Regla de bandas de uid: macOS asigna usuarios desde 501, Linux desde 1000.

pub const DEFAULT_MAC_MIN: i64 = 501;
pub const DEFAULT_LINUX_MIN: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformBands {
    /// Primer uid de usuario normal en la banda "mac".
    pub mac_min: i64,
    /// Primer uid de usuario normal en la banda "linux"; cierra la banda mac.
    pub linux_min: i64,
}

impl Default for PlatformBands {
    fn default() -> Self {
        Self {
            mac_min: DEFAULT_MAC_MIN,
            linux_min: DEFAULT_LINUX_MIN,
        }
    }
}

impl PlatformBands {
    /// Devuelve `None` si la banda mac quedaría vacía o invertida.
    pub fn new(mac_min: i64, linux_min: i64) -> Option<Self> {
        (mac_min < linux_min).then_some(Self { mac_min, linux_min })
    }

    pub fn is_mac_like(&self, id: i64) -> bool {
        (self.mac_min..self.linux_min).contains(&id)
    }

    pub fn is_linux_like(&self, id: i64) -> bool {
        id >= self.linux_min
    }

    /// `true` si `source` y `host` quedan en bandas opuestas, es decir, el uid
    /// de origen no significa nada en este sistema.
    pub fn straddles(&self, source: i64, host: i64) -> bool {
        (self.is_linux_like(source) && self.is_mac_like(host))
            || (self.is_linux_like(host) && self.is_mac_like(source))
    }
}

/// Interpreta un uid/gid en texto como entero con signo opcional.
pub fn parse_owner_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_and_linux_users_straddle() {
        let bands = PlatformBands::default();
        assert!(bands.straddles(501, 1000));
        assert!(bands.straddles(1000, 501));
        assert!(bands.straddles(999, 65534));
    }

    #[test]
    fn same_band_or_system_ids_do_not_straddle() {
        let bands = PlatformBands::default();
        assert!(!bands.straddles(501, 501));
        assert!(!bands.straddles(1000, 1001));
        assert!(!bands.straddles(0, 1000));
        assert!(!bands.straddles(500, 1000));
        assert!(!bands.straddles(1000, 0));
        assert!(!bands.straddles(-1, 501));
    }

    #[test]
    fn custom_bands_must_be_ordered() {
        assert!(PlatformBands::new(1000, 501).is_none());
        assert!(PlatformBands::new(1000, 1000).is_none());

        let bands = PlatformBands::new(100, 500).expect("bandas válidas");
        assert!(bands.straddles(100, 500));
        assert!(!bands.straddles(501, 1000));
    }

    #[test]
    fn parses_signed_integers_only() {
        assert_eq!(parse_owner_id("501"), Some(501));
        assert_eq!(parse_owner_id("+20"), Some(20));
        assert_eq!(parse_owner_id("-2"), Some(-2));
        assert_eq!(parse_owner_id("abc"), None);
        assert_eq!(parse_owner_id(" 501"), None);
        assert_eq!(parse_owner_id(""), None);
    }
}

mod maxmind;

pub use maxmind::MaxmindGeoLookup;

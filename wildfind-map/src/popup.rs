//! Information popup shown when the user clicks on signal locations.

use std::fmt::Write;

use wildfind_types::cartesian::Point2d;
use wildfind_types::geo::GeoPoint2d;

use crate::layer::LocationPoint;

/// One signal row of the popup table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRow {
    /// Frequency in Hz.
    pub frequency: u64,
    /// Pulse rate in PPM.
    pub rate: f64,
    /// Level in dB.
    pub level: f64,
}

impl SignalRow {
    /// Frequency in MHz with four decimals, as shown to the user.
    pub fn frequency_mhz(&self) -> String {
        format!("{:.4}", self.frequency as f64 / 1_000_000.0)
    }
}

/// Contents and anchor of the signal popup.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPopup {
    anchor: Point2d,
    location: GeoPoint2d,
    signals: Vec<SignalRow>,
}

impl SignalPopup {
    /// Builds the popup for the locations hit by a click.
    ///
    /// The location shown is the one of the first hit feature. Signal rows are deduplicated and
    /// sorted by frequency. Returns `None` if nothing was hit.
    pub fn from_hits<'a>(
        anchor: Point2d,
        hits: impl IntoIterator<Item = &'a LocationPoint>,
    ) -> Option<Self> {
        let mut hits = hits.into_iter().peekable();
        let location = hits.peek()?.position();

        let mut signals: Vec<SignalRow> = Vec::new();
        for hit in hits {
            let row = SignalRow {
                frequency: hit.frequency(),
                rate: hit.rate(),
                level: hit.level(),
            };
            if !signals.contains(&row) {
                signals.push(row);
            }
        }

        signals.sort_by(|a, b| {
            a.frequency
                .cmp(&b.frequency)
                .then(a.rate.total_cmp(&b.rate))
                .then(a.level.total_cmp(&b.level))
        });

        Some(Self {
            anchor,
            location,
            signals,
        })
    }

    /// Point of the map (working projection) the popup points to.
    pub fn anchor(&self) -> Point2d {
        self.anchor
    }

    /// Geographic position of the clicked location.
    pub fn location(&self) -> GeoPoint2d {
        self.location
    }

    /// Unique signals at the clicked position.
    pub fn signals(&self) -> &[SignalRow] {
        &self.signals
    }

    /// Renders the popup as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<h4>Location</h4>");
        html.push_str(&self.location.to_string_xy(5));
        html.push_str("<h4>Signals</h4>");
        html.push_str("<table class=\"SigTable\">");
        html.push_str(
            "<tr><th>Freq<br/>(MHz)</th><th>Rate<br/>(PPM)</th><th>Level<br/>(dB)</th></tr>",
        );
        for row in &self.signals {
            // Writing into a String cannot fail.
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                row.frequency_mhz(),
                row.rate,
                row.level
            );
        }
        html.push_str("</table>");

        html
    }
}

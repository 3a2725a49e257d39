/// A free-text location (city or postal code) with an optional country code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub location: String,
    pub country: Option<String>,
}

impl LocationQuery {
    /// Join command arguments into a location. `None` when there is nothing to search for.
    ///
    /// A comma in the text means the user already qualified the location
    /// (`London,gb`, `Portland, OR, us`); otherwise `default_country` is attached.
    pub fn from_args<S: AsRef<str>>(args: &[S], default_country: &str) -> Option<Self> {
        let text = args
            .iter()
            .map(AsRef::as_ref)
            .filter(|a| !a.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let text = text.trim();

        if text.is_empty() {
            return None;
        }

        let country = (!text.contains(','))
            .then_some(default_country.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_owned);

        Some(Self {
            location: text.to_owned(),
            country,
        })
    }

    /// Value of the `q` parameter: `<location>,<country>`.
    pub fn as_query(&self) -> String {
        match &self.country {
            Some(country) => format!("{},{}", self.location, country),
            None => self.location.clone(),
        }
    }
}

//! Turning `list-volume` flags into a [`ListRequest`]
//!
//! Everything here is pure: the process identity and config defaults are passed
//! in, so the parsing rules can be tested without a command line or a backend.

use crate::commands::traits::ListVolumeArgs;
use crate::error::{Result as ShResult, ShellError};
use crate::store::{ListScope, OwnerSource};
use url::Url;

/// Endpoint relative URIs are resolved against
pub const DEFAULT_ENDPOINT: &str = "o3://localhost/";

pub const SUPPORTED_SCHEMES: [&str; 2] = ["o3", "http"];

/// A fully validated volume listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub endpoint: Url,
    pub scope: ListScope,
    pub prefix: Option<String>,
    pub start_after: Option<String>,
    /// Always greater than zero; `usize::MAX` when no cap was given
    pub max_results: usize,
    pub verbose: bool,
}

impl ListRequest {
    /// Build a request from raw flags
    ///
    /// `default_user` comes from the config file and `process_user` is the
    /// identity of the invoking process. Both only matter when neither `--user`
    /// nor `--all` was given.
    pub fn from_args(
        args: &ListVolumeArgs,
        default_user: Option<&str>,
        process_user: Option<&str>,
    ) -> ShResult<Self> {
        let max_results = match args.length.as_deref() {
            Some(raw) => parse_max_results(raw)?,
            None => usize::MAX,
        };
        let endpoint = verify_uri(args.uri.as_deref())?;
        let scope = resolve_scope(args.user.as_deref(), args.all, default_user, process_user)?;

        Ok(ListRequest {
            endpoint,
            scope,
            prefix: non_empty(args.prefix.as_deref()),
            start_after: non_empty(args.start.as_deref()),
            max_results,
            verbose: args.verbose,
        })
    }

    pub fn is_bounded(&self) -> bool {
        self.max_results != usize::MAX
    }
}

/// Parse the `--length` value; it must be a positive integer
pub fn parse_max_results(raw: &str) -> ShResult<usize> {
    let value: i64 = raw.parse().map_err(|_| {
        ShellError::InvalidArgument(format!(
            "Invalid max key length '{raw}', the value should be digital"
        ))
    })?;
    if value <= 0 {
        return Err(ShellError::InvalidArgument(format!(
            "Invalid max key length '{raw}', the value should be positive"
        )));
    }
    usize::try_from(value).map_err(|_| {
        ShellError::InvalidArgument(format!("Invalid max key length '{raw}', the value is too large"))
    })
}

/// Validate the listing target URI
///
/// An absent or empty URI means `/`. Only the service root can be listed, so
/// any path beyond `/` is rejected.
pub fn verify_uri(raw: Option<&str>) -> ShResult<Url> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("/");

    let parsed = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(DEFAULT_ENDPOINT).and_then(|base| base.join(raw))
    };
    let uri = parsed.map_err(|e| ShellError::InvalidUri(format!("{raw}: {e}")))?;

    if !SUPPORTED_SCHEMES.contains(&uri.scheme()) {
        return Err(ShellError::InvalidUri(format!(
            "{uri}. Unsupported scheme '{}'",
            uri.scheme()
        )));
    }

    let path = uri.path();
    if !path.is_empty() && path != "/" {
        return Err(ShellError::InvalidUri(format!(
            "{uri} . Specified path not used.{path}"
        )));
    }
    Ok(uri)
}

/// Decide which provider entry point the listing goes through
pub fn resolve_scope(
    user: Option<&str>,
    all: bool,
    default_user: Option<&str>,
    process_user: Option<&str>,
) -> ShResult<ListScope> {
    let scope = match (user, all) {
        (Some(_), true) => {
            return Err(ShellError::InvalidArgument(
                "--user and --all cannot be used together".to_string(),
            ));
        }
        (Some(name), false) if name.trim().is_empty() => {
            return Err(ShellError::InvalidArgument(
                "user name must not be empty".to_string(),
            ));
        }
        (Some(name), false) => owned(name, OwnerSource::Explicit),
        (None, true) => ListScope::Global,
        (None, false) => match (non_empty(default_user), non_empty(process_user)) {
            (Some(name), _) => owned(&name, OwnerSource::Config),
            (None, Some(name)) => owned(&name, OwnerSource::ProcessUser),
            (None, None) => ListScope::Global,
        },
    };

    log::debug!("listing scope resolved to {scope:?}");
    Ok(scope)
}

/// Login name of the invoking process, if the environment reveals one
pub fn process_user() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|name| !name.trim().is_empty())
}

fn owned(name: &str, source: OwnerSource) -> ListScope {
    ListScope::Owner {
        name: name.trim().to_string(),
        source,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

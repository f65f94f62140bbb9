//! Remote URL handling.

/// Converts a remote URL into the repository's web URL.
///
/// Accepts `git@host:owner/repo.git`, `ssh://git@host/owner/repo.git` and
/// `http(s)://host/owner/repo(.git)`. Returns `None` for anything else
/// (local paths, `file://` remotes).
#[must_use]
pub fn web_url(remote: &str) -> Option<String> {
    let remote = remote.trim();

    let (host, path) = if let Some(rest) = remote.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map_or(rest, |(_, r)| r);
        let (host, path) = rest.split_once('/')?;
        // ssh://git@host:2222/owner/repo carries a port the web URL lacks
        (host.split(':').next()?, path)
    } else if let Some(rest) = remote
        .strip_prefix("https://")
        .or_else(|| remote.strip_prefix("http://"))
    {
        let rest = rest.split_once('@').map_or(rest, |(_, r)| r);
        rest.split_once('/')?
    } else if let Some((user_host, path)) = remote.split_once(':') {
        if !user_host.contains('@') {
            return None;
        }
        (user_host.split_once('@')?.1, path)
    } else {
        return None;
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    if host.is_empty() || path.is_empty() {
        return None;
    }

    Some(format!("https://{host}/{path}"))
}

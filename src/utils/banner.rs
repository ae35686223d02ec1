use url::Url;

use crate::env::Settings;

const MASK: &str = "*******";

/// QuickNode endpoints carry the API token as the last path segment and an account
/// specific subdomain.
fn mask_quik_node_url(mut url: Url) -> Option<String> {
    let segments: Vec<String> = url
        .path_segments()
        .map(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    if let Some((_, rest)) = segments.split_last() {
        let mut masked = rest.to_vec();
        masked.push(MASK.to_string());

        url.set_path(&masked.join("/"));
    }

    if let Some(host) = url.host_str().map(String::from) {
        let parts: Vec<&str> = host.split('.').collect();

        if parts.len() > 2 {
            let masked_host = std::iter::once(MASK)
                .chain(parts[1..].iter().copied())
                .collect::<Vec<_>>()
                .join(".");

            url.set_host(Some(&masked_host)).ok()?;
        }
    }

    Some(url.to_string())
}

pub fn remove_credentials_from_url(url_string: &str) -> Option<String> {
    let mut url = Url::parse(url_string).ok()?;

    if url
        .host_str()
        .is_some_and(|host| host.contains("quiknode.pro"))
    {
        return mask_quik_node_url(url);
    }

    if !url.username().is_empty() || url.password().is_some() {
        url.set_username(MASK).ok()?;
        url.set_password(None).ok()?;
    }

    Some(url.into())
}

pub fn print_banner(settings: &Settings, sentry_enabled: bool) {
    println!("Validator rewards API - block rewards & sync committee duties");
    println!("=============================================================");

    println!("Port: {}", settings.port);
    println!(
        "Node endpoint: {}",
        remove_credentials_from_url(&settings.rpc_url).unwrap_or_else(|| MASK.to_string())
    );
    println!("Request timeout: {:?}", settings.request_timeout);
    println!("Shutdown grace period: {:?}", settings.shutdown_grace_period);
    println!(
        "Sentry reporting: {}",
        if sentry_enabled { "yes" } else { "no" }
    );

    println!();
}

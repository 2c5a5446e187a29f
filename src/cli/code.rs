use crate::{error, types::CodeStyle, utils};

pub fn code(link: String, style: CodeStyle) {
    match utils::parse_spotify_link(&link) {
        Some(parsed) => {
            let uri = utils::spotify_uri(parsed.kind, &parsed.id);
            println!("{}", utils::scannable_code_url(&uri, style));
        }
        None => error!("Invalid link: {}", link),
    }
}

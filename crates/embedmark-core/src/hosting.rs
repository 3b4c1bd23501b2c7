use crate::error::MarkdownError;

/// Embed (player) URL for a hosting token.
pub(crate) fn embed_url(hosting: &str, token: &str) -> Result<String, MarkdownError> {
    let url = match hosting {
        "youtube" => format!("//youtube.com/embed/{}/", token),
        "vimeo" => format!("//player.vimeo.com/video/{}", token),
        "rutube" => format!("//rutube.ru/play/embed/{}", token),
        "vk" => format!("//vk.com/video_ext.php?{}", token),
        "dailymotion" => format!("//dailymotion.com/embed/video/{}", token),
        "sapo" => format!(
            "http://videos.sapo.pt/playhtml?file=http://rd3.videos.sapo.pt/{}/mov/1",
            token
        ),
        _ => {
            return Err(MarkdownError::UnknownHosting {
                name: hosting.to_string(),
            });
        }
    };
    Ok(url)
}

/// Watch-page URL for a hosting token, used by dummy (placeholder) anchors.
pub(crate) fn watch_url(hosting: &str, token: &str) -> Result<String, MarkdownError> {
    let url = match hosting {
        "youtube" => format!("https://www.youtube.com/watch?v={}", token),
        "vimeo" => format!("http://vimeo.com/{}", token),
        "rutube" => format!("http://rutube.ru/video/{}/", token),
        "vk" => format!("https://vk.com/video_ext.php?{}", token),
        "dailymotion" => format!("http://www.dailymotion.com/embed/video/{}", token),
        "sapo" => format!("http://rd3.videos.sapo.pt/{}", token),
        _ => {
            return Err(MarkdownError::UnknownHosting {
                name: hosting.to_string(),
            });
        }
    };
    Ok(url)
}

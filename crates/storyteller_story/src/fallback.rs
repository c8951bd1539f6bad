//! The built-in story used when narrative generation fails.

use std::collections::BTreeMap;
use storyteller_core::PageNumber;

const FALLBACK_JA: [&str; 3] = [
    "森のはずれに、ふわふわという白いうさぎが住んでいました。ふわふわは今日も元気に野原をぴょんぴょん跳ねています。",
    "ある日、ふわふわは大きな木の下で、道に迷った小さなりすに出会いました。「いっしょにおうちを探そう!」とふわふわは言いました。",
    "ふたりは花畑を抜けて、りすのおうちを見つけました。新しいお友だちができて、ふわふわはにっこり笑いました。おしまい。",
];

const FALLBACK_EN: [&str; 3] = [
    "At the edge of the forest lived a little white rabbit called Fuwafuwa. Every day Fuwafuwa hopped happily across the meadow.",
    "One day, under a big tree, Fuwafuwa met a tiny squirrel who had lost the way home. \"Let's look for your home together!\" said Fuwafuwa.",
    "Together they crossed the flower field and found the squirrel's home. Fuwafuwa smiled, happy to have made a new friend. The end.",
];

/// The built-in story, limited to `max_pages`.
///
/// Japanese for `ja` (and its regional variants), English otherwise.
pub fn fallback_pages(language: &str, max_pages: u32) -> BTreeMap<PageNumber, String> {
    let texts = if language.to_ascii_lowercase().starts_with("ja") {
        FALLBACK_JA
    } else {
        FALLBACK_EN
    };

    (1..=max_pages)
        .zip(texts)
        .filter_map(|(number, text)| PageNumber::new(number).map(|page| (page, text.to_string())))
        .collect()
}

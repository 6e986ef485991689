use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct BirdImagesProps {
    html: String,
}

/// Container whose contents are replaced wholesale by each selection
#[component]
pub fn BirdImages(props: BirdImagesProps) -> Element {
    rsx! {
        div {
            id: "bird-images",
            dangerous_inner_html: "{props.html}"
        }
    }
}

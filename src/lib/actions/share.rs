//! Module for handing stamps over to a system share target.

use mime::Mime;

use crate::model::Config;
use crate::render::RenderOutput;
use super::{ActionError, ActionResult};


/// Image file attached to a share.
#[derive(Clone, Debug, PartialEq)]
pub struct SharedFile {
    pub name: String,
    pub mime_type: Mime,
    pub bytes: Vec<u8>,
}

/// What is being shared.
#[derive(Clone, Debug, PartialEq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub file: Option<SharedFile>,
    pub url: Option<String>,
}

/// How a share ended up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShareOutcome {
    /// The image itself was shared.
    File,
    /// Only a link was shared, as the target cannot take files.
    Link,
    /// The user dismissed the share.
    Cancelled,
}


/// Target of shares, like the share sheet of the system.
pub trait ShareTarget {
    /// Whether the target accepts files, rather than just text and links.
    fn can_share_files(&self) -> bool;

    /// Share the payload.
    /// Should return `ActionError::Cancelled` if the user dismissed it.
    fn share(&mut self, payload: SharePayload) -> ActionResult<()>;
}


/// Share a rendered stamp.
///
/// The image is shared as a file if the target supports that,
/// otherwise the share link is shared instead.
/// A share cancelled by the user is not an error.
pub fn share_image(target: &mut dyn ShareTarget, output: &RenderOutput,
                   config: &Config, link: &str) -> ActionResult<ShareOutcome> {
    let (payload, outcome) = if target.can_share_files() {
        let file = SharedFile{
            name: format!("lgtm.{}", output.format().extension()),
            mime_type: output.mime_type(),
            bytes: output.bytes().to_vec(),
        };
        let payload = SharePayload{
            title: "LGTM Image".into(),
            text: config.text.clone(),
            file: Some(file),
            url: None,
        };
        (payload, ShareOutcome::File)
    } else {
        debug!("Share target doesn't accept files, sharing the link");
        let payload = SharePayload{
            title: "LGTM Generator".into(),
            text: format!("Check out my LGTM image: \"{}\"", config.text),
            file: None,
            url: Some(link.to_owned()),
        };
        (payload, ShareOutcome::Link)
    };
    deliver(target, payload, outcome)
}

/// Share just a link, with an optional title and text.
///
/// A share cancelled by the user is not an error.
pub fn share_link(target: &mut dyn ShareTarget, link: &str,
                  title: Option<&str>, text: Option<&str>) -> ActionResult<ShareOutcome> {
    let payload = SharePayload{
        title: title.unwrap_or("LGTM Generator").to_owned(),
        text: text.unwrap_or("Check out this LGTM image!").to_owned(),
        file: None,
        url: Some(link.to_owned()),
    };
    deliver(target, payload, ShareOutcome::Link)
}

fn deliver(target: &mut dyn ShareTarget, payload: SharePayload,
           outcome: ShareOutcome) -> ActionResult<ShareOutcome> {
    match target.share(payload) {
        Ok(()) => Ok(outcome),
        Err(ActionError::Cancelled) => {
            debug!("Share cancelled");
            Ok(ShareOutcome::Cancelled)
        }
        Err(e) => {
            error!("Share failed: {}", e);
            Err(e)
        }
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use crate::actions::{ActionError, ActionResult};
    use crate::model::Config;
    use crate::render::{Engine, OutputFormat, RenderOptions, RenderOutput};
    use super::{share_image, share_link, SharePayload, ShareOutcome, ShareTarget};

    /// Share target that records what it's given.
    struct Recorder {
        files: bool,
        response: Option<fn() -> ActionError>,
        shared: Vec<SharePayload>,
    }

    impl Recorder {
        fn new(files: bool) -> Self {
            Recorder{files, response: None, shared: vec![]}
        }
    }

    impl ShareTarget for Recorder {
        fn can_share_files(&self) -> bool {
            self.files
        }
        fn share(&mut self, payload: SharePayload) -> ActionResult<()> {
            self.shared.push(payload);
            match self.response {
                Some(err) => Err(err()),
                None => Ok(()),
            }
        }
    }

    fn render(format: OutputFormat) -> RenderOutput {
        Engine::new().unwrap()
            .render(&Config::default(), &RenderOptions::new().size(16, 16).scale(1.0).format(format))
            .unwrap()
    }

    const LINK: &'static str = "http://localhost:3000/?text=LGTM";

    #[test]
    fn shares_file() {
        let output = render(OutputFormat::Jpeg);
        let mut target = Recorder::new(true);
        let outcome = share_image(&mut target, &output, &Config::default(), LINK).unwrap();
        assert_that!(outcome).is_equal_to(ShareOutcome::File);

        let payload = &target.shared[0];
        let file = payload.file.as_ref().unwrap();
        assert_that!(file.name.as_str()).is_equal_to("lgtm.jpg");
        assert_that!(file.mime_type.as_ref()).is_equal_to("image/jpeg");
        assert_that!(payload.text.as_str()).is_equal_to("LGTM");
        assert_that!(payload.url).is_none();
    }

    #[test]
    fn falls_back_to_link() {
        let output = render(OutputFormat::Png);
        let mut target = Recorder::new(false);
        let outcome = share_image(&mut target, &output, &Config::default(), LINK).unwrap();
        assert_that!(outcome).is_equal_to(ShareOutcome::Link);

        let payload = &target.shared[0];
        assert_that!(payload.file).is_none();
        assert_that!(payload.url.as_ref().map(|u| u.as_str())).is_equal_to(Some(LINK));
        assert_that!(payload.text.as_str()).is_equal_to("Check out my LGTM image: \"LGTM\"");
    }

    #[test]
    fn cancelled_is_not_an_error() {
        let output = render(OutputFormat::Png);
        let mut target = Recorder::new(true);
        target.response = Some(|| ActionError::Cancelled);
        let outcome = share_image(&mut target, &output, &Config::default(), LINK).unwrap();
        assert_that!(outcome).is_equal_to(ShareOutcome::Cancelled);

        target.response = Some(|| ActionError::Failed("no network".into()));
        assert_that!(share_image(&mut target, &output, &Config::default(), LINK)).is_err();
    }

    #[test]
    fn link_only() {
        let mut target = Recorder::new(true);
        let outcome = share_link(&mut target, LINK, None, None).unwrap();
        assert_that!(outcome).is_equal_to(ShareOutcome::Link);

        let payload = &target.shared[0];
        assert_that!(payload.file).is_none();
        assert_that!(payload.title.as_str()).is_equal_to("LGTM Generator");
        assert_that!(payload.text.as_str()).is_equal_to("Check out this LGTM image!");
        assert_that!(payload.url.as_ref().map(|u| u.as_str())).is_equal_to(Some(LINK));

        share_link(&mut target, LINK, Some("Ship it"), Some("Approved")).unwrap();
        assert_that!(target.shared[1].title.as_str()).is_equal_to("Ship it");
        assert_that!(target.shared[1].text.as_str()).is_equal_to("Approved");

        target.response = Some(|| ActionError::Cancelled);
        assert_that!(share_link(&mut target, LINK, None, None))
            .is_ok().is_equal_to(ShareOutcome::Cancelled);
    }
}

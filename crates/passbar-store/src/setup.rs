//! First-use configuration of the gpg client.
//!
//! Runs lazily the first time an entry is opened. Each missing path is asked
//! for until it exists; answers are committed to the settings file right
//! away so the next session does not ask again.

use passbar_core::config::Settings;
use passbar_core::presenter::{PathPrompt, Presenter};
use passbar_core::paths;
use tracing::{info, warn};

use crate::error::{Result, StoreError};
use crate::gpg::GpgClient;

const NO_BINARY_TITLE: &str = "No GPG Binary entered";
const NO_BINARY_MESSAGE: &str = "The GPG Binary is required for use and since none was \
                                 entered, the application will now exit.";
const NO_HOME_TITLE: &str = "No GPG Home entered";
const NO_HOME_MESSAGE: &str = "The GPG Home directory is required for use and since none \
                               was entered, the application will now exit.";

/// Make sure a usable gpg binary and home directory are configured, asking
/// the user for whichever is missing, and build a client from them.
///
/// Abandoning either prompt is fatal: the user is told so and
/// [`StoreError::SetupAbandoned`] is returned.
pub fn configure_crypto_client<P>(settings: &mut Settings, presenter: &mut P) -> Result<GpgClient>
where
    P: Presenter + ?Sized,
{
    while !paths::is_file(settings.gpg_binary_path()) {
        let current = settings.gpg_binary_path();
        warn!(binary = %current.display(), "gpg binary not found");
        let prompt = PathPrompt::gpg_binary(current.display().to_string());
        match presenter.prompt_path(&prompt)? {
            Some(path) => {
                settings.set_gpg_binary_path(&path);
                settings.commit()?;
            }
            None => {
                presenter.show_message(NO_BINARY_MESSAGE, NO_BINARY_TITLE)?;
                return Err(StoreError::SetupAbandoned("no gpg binary entered".into()));
            }
        }
    }

    while !paths::is_dir(settings.gpg_home()) {
        let current = settings.gpg_home();
        warn!(home = %current.display(), "gpg home directory not found");
        let prompt = PathPrompt::gpg_home(current.display().to_string());
        match presenter.prompt_path(&prompt)? {
            Some(path) => {
                settings.set_gpg_home(&path);
                settings.commit()?;
            }
            None => {
                presenter.show_message(NO_HOME_MESSAGE, NO_HOME_TITLE)?;
                return Err(StoreError::SetupAbandoned("no gpg home entered".into()));
            }
        }
    }

    let client = GpgClient::new(settings.gpg_binary_path(), settings.gpg_home());
    info!(
        binary = %client.binary_path().display(),
        home = %client.home().display(),
        "gpg client ready"
    );
    Ok(client)
}

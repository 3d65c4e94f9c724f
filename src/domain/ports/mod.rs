mod icon_provider_port;
mod image_cache_port;
mod preference_port;
mod upload_port;

pub use icon_provider_port::IconProviderPort;
pub use image_cache_port::ImageCachePort;
pub use preference_port::PreferencePort;
pub use upload_port::UploadPort;

#[cfg(test)]
pub use upload_port::MockUploadPort;

#[cfg(test)]
pub mod mocks {
    pub use super::icon_provider_port::mock::MockIconProvider;
    pub use super::preference_port::mock::FlakyPreferences;
    pub use super::upload_port::mock::StubUploader;
}

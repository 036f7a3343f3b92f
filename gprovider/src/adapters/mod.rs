#[cfg(feature = "service-clarifai")]
pub mod clarifai;

#[cfg(feature = "service-cohere")]
pub mod cohere;

#[cfg(feature = "service-spoonacular")]
pub mod spoonacular;

pub mod client;
pub mod credential;
pub mod decode;
pub mod error;
pub mod qr;
pub mod session;
pub mod state;
pub mod types;

pub use client::OutpostClient;
pub use credential::{Credential, CredentialStore, MemoryCredentialStore};
pub use decode::{decode_catalog, decode_location, decode_merchant};
pub use error::{DecodeError, FetchError};
pub use session::OrderingSession;
pub use state::{FetchState, Resource};
pub use types::{
    Address, Category, CustomAttributeValues, Envelope, Item, ItemData, ItemDetails,
    ItemVariation, ItemVariationData, LocationDetail, LocationDetails, LocationEnvelope,
    MenuCatalog, Merchant, MerchantDetails, MerchantEnvelope, PriceMoney,
};

use crate::{
    ids::{EnclosureId, SubscriberPortId},
    types::{GpsPoint, PortStatus},
};
use serde::{Deserialize, Serialize};

///
/// SubscriberPort
///
/// Drop position on a termination point; the last documented element
/// before the customer's premises.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SubscriberPort {
    pub id: SubscriberPortId,
    pub enclosure: EnclosureId,
    pub number: u32,
    pub status: PortStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

///
/// Customer
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
}

use std::{fmt, net::Ipv4Addr};

use ledger_proto::services as proto;

use crate::error::TransactionError;

const MAX_DOMAIN_NAME_LEN: usize = 253;

/// Where a node endpoint listens: an IPv4 address or a fully qualified domain name,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EndpointAddress {
    Ip(Ipv4Addr),
    Domain(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub address: EndpointAddress,
    pub port: u16,
}

impl Endpoint {
    pub fn ip(address: Ipv4Addr, port: u16) -> Self {
        Self {
            address: EndpointAddress::Ip(address),
            port,
        }
    }

    pub fn domain(name: impl Into<String>, port: u16) -> Result<Self, TransactionError> {
        let name = name.into();
        if name.is_empty() || name.len() > MAX_DOMAIN_NAME_LEN || !name.is_ascii() {
            return Err(TransactionError::invalid_argument(format!(
                "endpoint domain name `{name}` must be 1 to {MAX_DOMAIN_NAME_LEN} ascii characters"
            )));
        }
        Ok(Self {
            address: EndpointAddress::Domain(name),
            port,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.address {
            EndpointAddress::Ip(ip) => write!(f, "{ip}:{}", self.port),
            EndpointAddress::Domain(name) => write!(f, "{name}:{}", self.port),
        }
    }
}

impl From<&Endpoint> for proto::ServiceEndpoint {
    fn from(value: &Endpoint) -> Self {
        let (ip_address_v4, domain_name) = match &value.address {
            EndpointAddress::Ip(ip) => (ip.octets().to_vec(), String::new()),
            EndpointAddress::Domain(name) => (Vec::new(), name.clone()),
        };
        Self {
            ip_address_v4,
            port: i32::from(value.port),
            domain_name,
        }
    }
}

impl TryFrom<proto::ServiceEndpoint> for Endpoint {
    type Error = TransactionError;

    fn try_from(value: proto::ServiceEndpoint) -> Result<Self, Self::Error> {
        let port = u16::try_from(value.port).map_err(|_| {
            TransactionError::invalid_argument(format!("endpoint port {} out of range", value.port))
        })?;
        match (value.ip_address_v4.as_slice(), value.domain_name.is_empty()) {
            ([a, b, c, d], true) => Ok(Self::ip(Ipv4Addr::new(*a, *b, *c, *d), port)),
            ([], false) => Self::domain(value.domain_name, port),
            ([], true) => Err(TransactionError::invalid_argument(
                "endpoint needs an ip address or a domain name",
            )),
            (_, false) => Err(TransactionError::invalid_argument(
                "endpoint must not set both an ip address and a domain name",
            )),
            (bytes, true) => Err(TransactionError::invalid_argument(format!(
                "endpoint ip address of {} bytes",
                bytes.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use ledger_proto::services as proto;

    use super::Endpoint;
    use crate::error::TransactionError;

    #[test]
    fn ip_and_domain_round_trip() {
        for endpoint in [
            Endpoint::ip(Ipv4Addr::new(10, 0, 0, 1), 50211),
            Endpoint::domain("node.example.com", 443).unwrap(),
        ] {
            let wire = proto::ServiceEndpoint::from(&endpoint);
            assert_eq!(Endpoint::try_from(wire).unwrap(), endpoint);
        }
    }

    #[test]
    fn rejects_ip_and_domain_together() {
        let wire = proto::ServiceEndpoint {
            ip_address_v4: vec![127, 0, 0, 1],
            port: 50211,
            domain_name: "localhost".to_string(),
        };
        assert!(matches!(
            Endpoint::try_from(wire),
            Err(TransactionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_empty_domain() {
        assert!(Endpoint::domain("", 1).is_err());
    }
}

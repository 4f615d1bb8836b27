//! Asset ABI: initializers and token events
//!
//! Both families expose an `initialize` function; their selectors differ
//! because the parameter lists do.

use crate::error::{LedgerError, LedgerResult};
use ethabi::{Event, EventParam, Function, Param, ParamType, StateMutability, Token};
use ethereum_types::{Address, H256, U256};
use launch_types::{ReservelessParams, TokenMetadata};

fn param(name: &str, kind: ParamType) -> Param {
    Param {
        name: name.to_string(),
        kind,
        internal_type: None,
    }
}

#[allow(deprecated)]
fn initializer(inputs: Vec<Param>) -> Function {
    Function {
        name: "initialize".to_string(),
        inputs,
        outputs: vec![],
        constant: None,
        state_mutability: StateMutability::Payable,
    }
}

/// initialize(string name, string symbol, string identity, address creator, uint8 ratio, uint256 initialMint, uint256 minTotalSupply, uint256 maxTotalSupply)
pub fn reserved_initializer() -> Function {
    initializer(vec![
        param("name", ParamType::String),
        param("symbol", ParamType::String),
        param("identity", ParamType::String),
        param("creator", ParamType::Address),
        param("ratio", ParamType::Uint(8)),
        param("initialMint", ParamType::Uint(256)),
        param("minTotalSupply", ParamType::Uint(256)),
        param("maxTotalSupply", ParamType::Uint(256)),
    ])
}

/// initialize(string name, string symbol, bool mintable, bool burnable, uint256 initialMint, uint256 cap, string identity, address owner)
pub fn reserveless_initializer() -> Function {
    initializer(vec![
        param("name", ParamType::String),
        param("symbol", ParamType::String),
        param("mintable", ParamType::Bool),
        param("burnable", ParamType::Bool),
        param("initialMint", ParamType::Uint(256)),
        param("cap", ParamType::Uint(256)),
        param("identity", ParamType::String),
        param("owner", ParamType::Address),
    ])
}

/// Calldata for a reserved-family instance, selector included
pub fn encode_reserved_init(meta: &TokenMetadata) -> LedgerResult<Vec<u8>> {
    reserved_initializer()
        .encode_input(&[
            Token::String(meta.name.clone()),
            Token::String(meta.symbol.clone()),
            Token::String(meta.identity.clone()),
            Token::Address(meta.creator),
            Token::Uint(U256::from(meta.ratio)),
            Token::Uint(meta.initial_mint),
            Token::Uint(meta.min_total_supply),
            Token::Uint(meta.max_total_supply),
        ])
        .map_err(|e| LedgerError::InvalidCalldata(e.to_string()))
}

/// Calldata for a reserveless-family instance owned by `owner`
pub fn encode_reserveless_init(params: &ReservelessParams, owner: Address) -> LedgerResult<Vec<u8>> {
    reserveless_initializer()
        .encode_input(&[
            Token::String(params.name.clone()),
            Token::String(params.symbol.clone()),
            Token::Bool(params.mintable),
            Token::Bool(params.burnable),
            Token::Uint(params.initial_mint),
            Token::Uint(params.cap),
            Token::String(params.identity.clone()),
            Token::Address(owner),
        ])
        .map_err(|e| LedgerError::InvalidCalldata(e.to_string()))
}

/// Check the selector and decode the arguments of `function`
pub fn decode_call(function: &Function, data: &[u8]) -> LedgerResult<Vec<Token>> {
    if data.len() < 4 {
        return Err(LedgerError::InvalidCalldata(format!(
            "{} bytes is shorter than a selector",
            data.len()
        )));
    }
    if data[..4] != function.short_signature() {
        return Err(LedgerError::InvalidCalldata(format!(
            "selector 0x{} does not match {}",
            hex_selector(&data[..4]),
            function.signature()
        )));
    }
    function
        .decode_input(&data[4..])
        .map_err(|e| LedgerError::InvalidCalldata(e.to_string()))
}

fn hex_selector(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Sequential typed reader over decoded tokens
pub struct TokenReader {
    tokens: std::vec::IntoIter<Token>,
}

impl TokenReader {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }

    fn next(&mut self, expected: &str) -> LedgerResult<Token> {
        self.tokens
            .next()
            .ok_or_else(|| LedgerError::InvalidCalldata(format!("missing {expected}")))
    }

    pub fn string(&mut self) -> LedgerResult<String> {
        self.next("string")?
            .into_string()
            .ok_or_else(|| LedgerError::InvalidCalldata("expected string".into()))
    }

    pub fn address(&mut self) -> LedgerResult<Address> {
        self.next("address")?
            .into_address()
            .ok_or_else(|| LedgerError::InvalidCalldata("expected address".into()))
    }

    pub fn uint(&mut self) -> LedgerResult<U256> {
        self.next("uint")?
            .into_uint()
            .ok_or_else(|| LedgerError::InvalidCalldata("expected uint".into()))
    }

    pub fn uint8(&mut self) -> LedgerResult<u8> {
        let value = self.uint()?;
        if value > U256::from(u8::MAX) {
            return Err(LedgerError::InvalidCalldata(format!("{value} overflows uint8")));
        }
        Ok(value.low_u32() as u8)
    }

    pub fn bool(&mut self) -> LedgerResult<bool> {
        self.next("bool")?
            .into_bool()
            .ok_or_else(|| LedgerError::InvalidCalldata("expected bool".into()))
    }
}

pub fn decode_reserved_init(data: &[u8]) -> LedgerResult<TokenMetadata> {
    let mut reader = TokenReader::new(decode_call(&reserved_initializer(), data)?);
    Ok(TokenMetadata {
        name: reader.string()?,
        symbol: reader.string()?,
        identity: reader.string()?,
        creator: reader.address()?,
        ratio: reader.uint8()?,
        initial_mint: reader.uint()?,
        min_total_supply: reader.uint()?,
        max_total_supply: reader.uint()?,
    })
}

pub fn decode_reserveless_init(data: &[u8]) -> LedgerResult<(ReservelessParams, Address)> {
    let mut reader = TokenReader::new(decode_call(&reserveless_initializer(), data)?);
    let params = ReservelessParams {
        name: reader.string()?,
        symbol: reader.string()?,
        mintable: reader.bool()?,
        burnable: reader.bool()?,
        initial_mint: reader.uint()?,
        cap: reader.uint()?,
        identity: reader.string()?,
    };
    Ok((params, reader.address()?))
}

/// event Transfer(address indexed from, address indexed to, uint256 value)
pub fn transfer_event() -> Event {
    Event {
        name: "Transfer".to_string(),
        inputs: vec![
            EventParam {
                name: "from".to_string(),
                kind: ParamType::Address,
                indexed: true,
            },
            EventParam {
                name: "to".to_string(),
                kind: ParamType::Address,
                indexed: true,
            },
            EventParam {
                name: "value".to_string(),
                kind: ParamType::Uint(256),
                indexed: false,
            },
        ],
        anonymous: false,
    }
}

/// event Approval(address indexed owner, address indexed spender, uint256 value)
pub fn approval_event() -> Event {
    Event {
        name: "Approval".to_string(),
        inputs: vec![
            EventParam {
                name: "owner".to_string(),
                kind: ParamType::Address,
                indexed: true,
            },
            EventParam {
                name: "spender".to_string(),
                kind: ParamType::Address,
                indexed: true,
            },
            EventParam {
                name: "value".to_string(),
                kind: ParamType::Uint(256),
                indexed: false,
            },
        ],
        anonymous: false,
    }
}

/// Left-pad an address into a topic word
pub fn address_topic(address: Address) -> H256 {
    H256::from(address)
}

/// Topics and data of a `(address indexed, address indexed, uint256)` event
pub fn pair_log(event: &Event, a: Address, b: Address, value: U256) -> (Vec<H256>, Vec<u8>) {
    (
        vec![event.signature(), address_topic(a), address_topic(b)],
        ethabi::encode(&[Token::Uint(value)]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use launch_types::units;

    fn meta() -> TokenMetadata {
        TokenMetadata {
            name: "Alpha".into(),
            symbol: "ALPHA".into(),
            identity: "ipfs://alpha".into(),
            creator: Address::repeat_byte(0x11),
            ratio: 50,
            initial_mint: units::whole(1_000),
            min_total_supply: units::whole(1),
            max_total_supply: units::whole(1_000_000),
        }
    }

    #[test]
    fn test_reserved_init_decodes_to_same_metadata() {
        let data = encode_reserved_init(&meta()).unwrap();
        assert_eq!(decode_reserved_init(&data).unwrap(), meta());
    }

    #[test]
    fn test_initializer_selectors_differ() {
        assert_ne!(
            reserved_initializer().short_signature(),
            reserveless_initializer().short_signature()
        );
    }

    #[test]
    fn test_wrong_selector_rejected() {
        let params = ReservelessParams {
            name: "Plain".into(),
            symbol: "PLN".into(),
            mintable: true,
            burnable: false,
            initial_mint: U256::from(5),
            cap: U256::zero(),
            identity: String::new(),
        };
        let data = encode_reserveless_init(&params, Address::repeat_byte(1)).unwrap();
        assert!(matches!(
            decode_reserved_init(&data),
            Err(LedgerError::InvalidCalldata(_))
        ));
        assert!(matches!(
            decode_reserved_init(&data[..3]),
            Err(LedgerError::InvalidCalldata(_))
        ));
    }

    #[test]
    fn test_transfer_signature() {
        // keccak256("Transfer(address,address,uint256)")
        assert_eq!(
            format!("{:x}", transfer_event().signature()),
            "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }
}

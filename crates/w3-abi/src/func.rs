//! Function descriptors parsed from Solidity signatures

use std::fmt;
use std::str::FromStr;

use crate::decode::decode;
use crate::detokenize::FromToken;
use crate::encode::{encode, function_selector};
use crate::types::{ParamType, Token};
use crate::AbiError;

/// A contract function: selector, input types and return types.
///
/// Built from a signature such as `"transfer(address to, uint256 amount)"`
/// and a comma-separated return type list such as `"bool"`. Parameter names
/// are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
    name: String,
    signature: String,
    selector: [u8; 4],
    inputs: Vec<ParamType>,
    outputs: Vec<ParamType>,
}

impl Func {
    /// Parse a function descriptor.
    pub fn new(signature: &str, returns: &str) -> Result<Self, AbiError> {
        let signature = signature.trim();
        let open = signature
            .find('(')
            .ok_or_else(|| AbiError::InvalidSignature(format!("missing '(' in {signature:?}")))?;
        if !signature.ends_with(')') {
            return Err(AbiError::InvalidSignature(format!(
                "missing ')' in {signature:?}"
            )));
        }

        let name = signature[..open].trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(AbiError::InvalidSignature(format!(
                "invalid function name {name:?}"
            )));
        }

        let inputs = parse_params(&signature[open + 1..signature.len() - 1])?;
        let outputs = parse_params(returns)?;

        let canonical = format!("{}{}", name, ParamType::Tuple(inputs.clone()));
        Ok(Self {
            name: name.to_string(),
            selector: function_selector(&canonical),
            signature: canonical,
            inputs,
            outputs,
        })
    }

    /// Function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical signature, e.g. `balanceOf(address)`
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// 4-byte selector
    pub fn selector(&self) -> [u8; 4] {
        self.selector
    }

    /// Input parameter types
    pub fn inputs(&self) -> &[ParamType] {
        &self.inputs
    }

    /// Return types
    pub fn outputs(&self) -> &[ParamType] {
        &self.outputs
    }

    /// Encode call input: selector followed by the encoded arguments.
    pub fn encode_args(&self, args: &[Token]) -> Result<Vec<u8>, AbiError> {
        let mut input = self.selector.to_vec();
        input.extend(encode(&self.inputs, args).map_err(|e| match e {
            AbiError::Encode(msg) => AbiError::Encode(format!("{}: {}", self.signature, msg)),
            other => other,
        })?);
        Ok(input)
    }

    /// Decode call input back into argument tokens.
    pub fn decode_args(&self, input: &[u8]) -> Result<Vec<Token>, AbiError> {
        if input.len() < 4 || input[..4] != self.selector {
            return Err(AbiError::Decode(format!(
                "input does not start with selector of {}",
                self.signature
            )));
        }
        decode(&self.inputs, &input[4..])
    }

    /// Decode return data into tokens.
    pub fn decode_output(&self, output: &[u8]) -> Result<Vec<Token>, AbiError> {
        decode(&self.outputs, output)
    }

    /// Decode return data into a typed destination.
    ///
    /// A single return value decodes into `T` directly; several return values
    /// decode into a tuple of matching arity.
    pub fn decode_returns<T: FromToken>(&self, output: &[u8]) -> Result<T, AbiError> {
        let mut tokens = self.decode_output(output)?;
        let token = if tokens.len() == 1 {
            tokens.remove(0)
        } else {
            Token::Tuple(tokens)
        };
        T::from_token(token)
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature)
    }
}

fn parse_params(list: &str) -> Result<Vec<ParamType>, AbiError> {
    split_top_level(list)?
        .into_iter()
        .map(|param| parse_type(strip_name(param)))
        .collect()
}

/// Split on commas that are not nested inside parentheses.
fn split_top_level(list: &str) -> Result<Vec<&str>, AbiError> {
    let list = list.trim();
    if list.is_empty() {
        return Ok(Vec::new());
    }

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    AbiError::InvalidSignature(format!("unbalanced ')' in {list:?}"))
                })?
            }
            ',' if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(AbiError::InvalidSignature(format!("unbalanced '(' in {list:?}")));
    }
    parts.push(list[start..].trim());

    if parts.iter().any(|p| p.is_empty()) {
        return Err(AbiError::InvalidSignature(format!("empty parameter in {list:?}")));
    }
    Ok(parts)
}

/// Drop a trailing parameter name (`address owner` -> `address`).
fn strip_name(param: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in param.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => return &param[..i],
            _ => {}
        }
    }
    param
}

/// Parse one type string (e.g. `uint256`, `address[]`, `(bool,bytes)[2]`).
pub(crate) fn parse_type(s: &str) -> Result<ParamType, AbiError> {
    let s = s.trim();

    if let Some(head) = s.strip_suffix(']') {
        let open = head
            .rfind('[')
            .ok_or_else(|| AbiError::InvalidSignature(format!("unbalanced ']' in {s:?}")))?;
        let inner = Box::new(parse_type(&head[..open])?);
        let size = &head[open + 1..];
        return if size.is_empty() {
            Ok(ParamType::Array(inner))
        } else {
            let size: usize = size
                .parse()
                .map_err(|_| AbiError::InvalidSignature(format!("invalid array size: {size}")))?;
            Ok(ParamType::FixedArray(inner, size))
        };
    }

    if let Some(inner) = s.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        return Ok(ParamType::Tuple(parse_params(inner)?));
    }

    match s {
        "address" => return Ok(ParamType::Address),
        "bool" => return Ok(ParamType::Bool),
        "string" => return Ok(ParamType::String),
        "bytes" => return Ok(ParamType::Bytes),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("uint") {
        return Ok(ParamType::Uint(int_bits(rest, s)?));
    }
    if let Some(rest) = s.strip_prefix("int") {
        return Ok(ParamType::Int(int_bits(rest, s)?));
    }
    if let Some(rest) = s.strip_prefix("bytes") {
        let size: usize = rest
            .parse()
            .map_err(|_| AbiError::InvalidSignature(format!("invalid bytes size: {rest}")))?;
        if !(1..=32).contains(&size) {
            return Err(AbiError::InvalidSignature(format!("invalid bytes size: {size}")));
        }
        return Ok(ParamType::FixedBytes(size));
    }

    Err(AbiError::InvalidSignature(format!("unknown type: {s}")))
}

fn int_bits(rest: &str, ty: &str) -> Result<usize, AbiError> {
    if rest.is_empty() {
        return Ok(256);
    }
    let bits: usize = rest
        .parse()
        .map_err(|_| AbiError::InvalidSignature(format!("invalid integer type: {ty}")))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::InvalidSignature(format!("invalid integer type: {ty}")));
    }
    Ok(bits)
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}

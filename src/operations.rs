//! Request shapes of the remote API.
//!
//! Every operation is one row: its name, the remote method it calls, and its
//! parameters as `arg: "wireName"` with an optional default. Parameters without a
//! default must be supplied by the caller; business values such as amounts or
//! message ids never get a placeholder.

use serde_json::Value;

use super::{Error, Params, Result};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDefault {
    Required,
    Str(&'static str),
    Bool(bool),
    Int(i64),
}
impl ParamDefault {
    pub fn value(self) -> Option<Value> {
        match self {
            ParamDefault::Required => None,
            ParamDefault::Str(s) => Some(s.into()),
            ParamDefault::Bool(b) => Some(b.into()),
            ParamDefault::Int(n) => Some(n.into()),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParamSpec {
    /// Name the caller passes.
    pub arg: &'static str,
    /// Name sent in the request's `params` object.
    pub wire: &'static str,
    pub default: ParamDefault,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: &'static str,
    pub params: &'static [ParamSpec],
}

impl Operation {
    pub fn find(name: &str) -> Option<&'static Operation> {
        OPERATIONS.iter().find(|op| op.name == name)
    }
    pub fn param(&self, arg: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.arg == arg)
    }
}

/// Maps caller arguments to the wire parameters of `op`, filling in defaults.
///
/// A `null` argument counts as omitted.
pub fn build_params(op: &'static Operation, mut args: Params) -> Result<Params> {
    if let Some(unknown) = args.keys().find(|k| op.param(k).is_none()) {
        return Err(Error::UnknownParam {
            operation: op.name,
            param: unknown.clone(),
        });
    }
    let mut params = Params::new();
    for p in op.params {
        let value = match args.remove(p.arg) {
            Some(Value::Null) | None => p.default.value().ok_or(Error::MissingParam {
                operation: op.name,
                param: p.arg,
            })?,
            Some(value) => value,
        };
        params.insert(p.wire.to_string(), value);
    }
    Ok(params)
}

macro_rules! param_default {
    () => {
        ParamDefault::Required
    };
    ($default:expr) => {
        $default
    };
}

macro_rules! operations {
    ($(
        $name:ident => $method:literal ($($arg:ident : $wire:literal $(= $default:expr)?),* $(,)?);
    )*) => {
        pub static OPERATIONS: &[Operation] = &[$(
            Operation {
                name: stringify!($name),
                method: $method,
                params: &[$(ParamSpec {
                    arg: stringify!($arg),
                    wire: $wire,
                    default: param_default!($($default)?),
                }),*],
            },
        )*];
    };
}

use ParamDefault::{Bool, Int, Str};

operations! {
    // system and profile
    get_system_info => "getSystemInfo"();
    get_profile_status => "getProfileStatus"();
    set_profile_status => "setProfileStatus"(status: "status", mood: "mood" = Str(""));
    get_own_contact => "getOwnContact"();
    set_profile_data => "setProfileData"(first_name: "firstName", last_name: "lastName");
    get_network_connections => "getNetworkConnections"();
    low_traffic_mode => "lowTrafficMode"();
    set_low_traffic_mode => "setLowTrafficMode"(enabled: "enabled");
    clear_tray_notifications => "clearTrayNotifications"();
    storage_wipe => "storageWipe"();
    get_web_socket_state => "getWebSocketState"();
    set_web_socket_state => "setWebSocketState"(enabled: "enabled", port: "port");

    // contacts
    get_contacts => "getContacts"(filter: "filter" = Str(""));
    get_contact_avatar => "getContactAvatar"(
        pk: "pk",
        coder: "coder" = Str("BASE64"),
        format: "format" = Str("PNG"),
    );
    set_contact_group => "setContactGroup"(pk: "contactPublicKey", group_name: "groupName");
    set_contact_nick => "setContactNick"(pk: "contactPublicKey", new_nick: "newNick");
    get_contact_groups => "getContactGroups"();
    get_contacts_by_group => "getContactsByGroup"(group_name: "groupName");
    delete_contact_group => "deleteContactGroup"(group_name: "groupName");
    delete_contact => "deleteContact"(pk: "contactPublicKey");
    send_authorization_request => "sendAuthorizationRequest"(pk: "pk", message: "message");
    accept_authorization_request => "acceptAuthorizationRequest"(pk: "pk", message: "message");
    reject_authorization_request => "rejectAuthorizationRequest"(pk: "pk", message: "message");
    get_whois_info => "getWhoIsInfo"(owner: "owner");

    // instant messages
    send_instant_message => "sendInstantMessage"(to: "to", text: "text");
    send_instant_quote => "sendInstantQuote"(
        to: "to",
        text: "text",
        message_id: "id_message_to_answer",
    );
    send_instant_sticker => "sendInstantSticker"(to: "to", collection: "collection", name: "name");
    send_instant_buzzer => "sendInstantBuzzer"(to: "to", comments: "comments" = Str(""));
    send_instant_invitation => "sendInstantInvitation"(
        to: "to",
        channel_id: "channelid",
        description: "description" = Str(""),
        comments: "comments" = Str(""),
    );
    get_contact_messages => "getContactMessages"(pk: "pk");
    remove_instant_messages => "removeInstantMessages"(pk: "hex_contact_public_key");
    get_sticker_collections => "getStickerCollections"();
    get_sticker_names_by_collection => "getStickerNamesByCollection"(
        collection_name: "collection_name",
    );
    get_sticker_image => "getStickerImage"(
        collection_name: "collection_name",
        sticker_name: "sticker_name",
        coder: "coder" = Str("BASE64"),
    );

    // email
    send_email_message => "sendEmailMessage"(to: "to", subject: "subject", body: "body");
    send_reply_email_message => "sendReplyEmailMessage"(
        id: "id",
        body: "body",
        subject: "subject" = Str(""),
    );
    send_forward_email_message => "sendForwardEmailMessage"(
        id: "id",
        to: "to",
        body: "body",
        subject: "subject" = Str(""),
    );
    get_email_folder => "getEmailFolder"(folder_type: "folderType" = Int(1), filter: "filter" = Str(""));
    get_emails => "getEmails"(folder_type: "folderType" = Int(1), filter: "filter" = Str(""));
    get_email_by_id => "getEmailById"(id: "id");
    delete_email => "deleteEmail"(id: "id");

    // finance
    get_balance => "getBalance"(currency: "currency" = Str("CRP"));
    get_finance_info => "getFinanceInfo"(currency: "currency" = Str("CRP"));
    get_finance_history => "getFinanceHistory"(
        filters: "filters" = Str("ALL_TRANSACTIONS"),
        reference_number: "referenceNumber" = Str(""),
        to_date: "toDate" = Str(""),
        from_date: "fromDate" = Str(""),
        batch_id: "batchId" = Str(""),
        from_amount: "fromAmount" = Str(""),
        to_amount: "toAmount" = Str(""),
        currency: "currency" = Str("CRP"),
    );
    send_payment => "sendPayment"(
        to: "to",
        amount: "amount",
        comment: "comment" = Str(""),
        from_card: "fromCard" = Str(""),
        currency: "currency" = Str("CRP"),
    );
    get_cards => "getCards"();
    add_card => "addCard"(color: "color", name: "name", preorder_number: "preorderNumber" = Str(""));
    delete_card => "deleteCard"(card_id: "cardId");
    get_vouchers => "getVouchers"();
    create_voucher => "createVoucher"(amount: "amount");
    use_voucher => "useVoucher"(voucher_id: "voucherid");
    delete_voucher => "deleteVoucher"(voucher_id: "voucherid");
    get_invoices => "getInvoices"(
        card_id: "cardId" = Str(""),
        invoice_id: "invoiceId" = Str(""),
        pk: "pk" = Str(""),
        transaction_id: "transactionId" = Str(""),
        status: "status" = Str(""),
        start_date_time: "startDateTime" = Str(""),
        end_date_time: "endDateTime" = Str(""),
        reference_number: "referenceNumber" = Str(""),
    );
    get_invoice_by_reference_number => "getInvoiceByReferenceNumber"(
        reference_number: "referenceNumber",
    );
    get_transaction_id_by_reference_number => "getTransactionIdByReferenceNumber"(
        reference_number: "referenceNumber",
    );
    send_invoice => "sendInvoice"(card_id: "cardid", amount: "amount", comment: "comment" = Str(""));
    accept_invoice => "acceptInvoice"(invoice_id: "invoiceid");
    decline_invoice => "declineInvoice"(invoice_id: "invoiceid");
    cancel_invoice => "cancelInvoice"(invoice_id: "invoiceid");
    get_mining_blocks => "getMiningBlocks"();
    get_mining_info => "getMiningInfo"();
    enable_mining => "enableMining"(enabled: "enabled");
    enable_interest => "enableInterest"(enabled: "enabled");
    enable_history_mining => "enableHistoryMining"(enabled: "enabled");
    status_history_mining => "statusHistoryMining"();
    request_treasury_interest_rates => "requestTreasuryInterestRates"();
    get_treasury_interest_rates => "getTreasuryInterestRates"();
    request_treasury_transaction_volumes => "requestTreasuryTransactionVolumes"();
    get_treasury_transaction_volumes => "getTreasuryTransactionVolumes"();

    // channels
    get_channels => "getChannels"(filter: "filter" = Str(""), channel_type: "channel_type" = Int(0));
    get_channel_avatar => "getChannelAvatar"(
        channel_id: "channelid",
        coder: "coder" = Str("BASE64"),
        format: "format" = Str("PNG"),
    );
    send_channel_message => "sendChannelMessage"(channel_id: "channelid", message: "message");
    send_channel_picture => "sendChannelPicture"(
        channel_id: "channelid",
        base64_image: "base64_image",
        filename: "filename_image" = Str(""),
    );
    join_channel => "joinChannel"(ident: "ident", password: "password" = Str(""));
    leave_channel => "leaveChannel"(channel_id: "channelid");
    get_channel_messages => "getChannelMessages"(channel_id: "channelid");
    get_channel_info => "getChannelInfo"(channel_id: "channelid");
    get_channel_moderators => "getChannelModerators"(channel_id: "channelid");
    get_channel_moderator_right => "getChannelModeratorRight"(
        channel_id: "channelid",
        moderator: "moderator",
    );
    add_channel_moderator => "addChannelModerator"(channel_id: "channelid", moderator: "moderator");
    remove_channel_moderator => "removeChannelModerator"(
        channel_id: "channelid",
        moderator: "moderator",
    );
    create_channel => "createChannel"(
        name: "channel_name",
        description: "description" = Str(""),
        read_only: "read_only" = Str("false"),
        password: "password" = Str(""),
        languages: "languages" = Str(""),
        hashtags: "hashtags" = Str(""),
        geo_tag: "geoTag" = Str(""),
        avatar: "base64_avatar_image" = Str(""),
        hide_in_ui: "hide_in_UI" = Str("false"),
    );
    modify_channel => "modifyChannel"(
        channel_id: "channelid",
        description: "description" = Str(""),
        read_only: "read_only" = Str("false"),
        languages: "languages" = Str(""),
        hashtags: "hashtags" = Str(""),
        geo_tag: "geoTag" = Str(""),
        avatar: "base64_avatar_image" = Str(""),
        hide_in_ui: "hide_in_UI" = Str("false"),
    );
    delete_channel => "deleteChannel"(channel_id: "channelid", password: "password" = Str(""));
    get_channel_contacts => "getChannelContacts"(channel_id: "channelid");
    get_channel_banned_contacts => "getChannelBannedContacts"(channel_id: "channelid");
    apply_channel_banned_contacts => "applyChannelBannedContacts"(
        channel_id: "channelid",
        new_list: "newList",
    );

    // UNS names
    uns_create_record_request => "unsCreateRecordRequest"(
        nick: "nick",
        valid: "valid",
        is_primary: "isPrimary" = Str("false"),
        channel_id: "channelId" = Str(""),
    );
    uns_modify_record_request => "unsModifyRecordRequest"(
        nick: "nick",
        valid: "valid",
        is_primary: "isPrimary" = Str("false"),
        channel_id: "channelId" = Str(""),
    );
    uns_delete_record_request => "unsDeleteRecordRequest"(nick: "nick");
    uns_search_by_pk => "unsSearchByPk"(filter: "filter" = Str(""));
    uns_search_by_nick => "unsSearchByNick"(filter: "filter" = Str(""));
    get_uns_sync_info => "getUnsSyncInfo"();
    uns_registered_names => "unsRegisteredNames"();
    summary_uns_registered_names => "summaryUnsRegisteredNames"(
        from_date: "fromDate" = Str(""),
        to_date: "toDate" = Str(""),
    );
    request_uns_transfer => "requestUnsTransfer"(name: "name", new_owner_pk: "hexNewOwnerPk");
    accept_uns_transfer => "acceptUnsTransfer"(request_id: "requestId");
    decline_uns_transfer => "declineUnsTransfer"(request_id: "requestId");
    incoming_uns_transfer => "incomingUnsTransfer"();
    outgoing_uns_transfer => "outgoingUnsTransfer"();

    // proxy mappings
    get_proxy_mappings => "getProxyMappings"();
    create_proxy_mapping => "createProxyMapping"(
        src_host: "srcHost",
        src_port: "srcPort",
        dst_host: "dstHost",
        dst_port: "dstPort",
        enabled: "enabled" = Bool(true),
    );
    enable_proxy_mapping => "enableProxyMapping"(mapping_id: "mappingId");
    disable_proxy_mapping => "disableProxyMapping"(mapping_id: "mappingId");
    remove_proxy_mapping => "removeProxyMapping"(mapping_id: "mappingId");

    // file manager
    upload_file => "uploadFile"(data: "fileDataBase64", file_name: "fileName");
    get_files_from_manager => "getFilesFromManager"();
    get_transfers_from_manager => "getTransfersFromManager"();
    abort_transfer => "abortTransfer"(transfer_id: "transferId");
    hide_transfer => "hideTransfer"(transfer_id: "transferId");
    get_file => "getFile"(file_id: "fileId");
    delete_file => "deleteFile"(file_id: "fileId");
    send_file_by_message => "sendFileByMessage"(pk: "contactPublicKey", file_id: "fileId");

    // uCode images
    ucode_encode => "ucodeEncode"(
        hex_code: "hex_code",
        size: "size_image" = Int(128),
        coder: "coder" = Str("BASE64"),
        format: "format" = Str("PNG"),
    );
    ucode_decode => "ucodeDecode"(base64_image: "base64_image");
}

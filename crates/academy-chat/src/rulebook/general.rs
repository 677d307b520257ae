//! Rules for the general security assistant.

use crate::rules::RuleTable;

pub const GREETING: &str = "Hello! I'm your cybersecurity learning assistant. Ask me anything about vulnerabilities, security tools, or ethical hacking techniques!";

const SQL_INJECTION: &str = "SQL Injection is a code injection technique that exploits vulnerabilities in an application's database layer. Attackers can:

1. Bypass authentication (e.g., using ' OR '1'='1)
2. Extract sensitive data
3. Modify or delete data
4. Execute admin operations

Prevention:
- Use parameterized queries/prepared statements
- Input validation and sanitization
- Principle of least privilege for database accounts
- Use ORM frameworks when possible

Try our SQL Injection lab to practice safely!";

const XSS: &str = "Cross-Site Scripting (XSS) allows attackers to inject malicious scripts into web pages. There are three main types:

1. **Reflected XSS**: Script comes from current HTTP request
2. **Stored XSS**: Script is stored in the database
3. **DOM-based XSS**: Vulnerability in client-side code

Prevention:
- Encode output data
- Validate input on server-side
- Use Content Security Policy (CSP)
- Sanitize HTML in user inputs
- Use modern frameworks with built-in XSS protection

Check out our XSS lab to see it in action!";

const NMAP: &str = "Nmap (Network Mapper) is a powerful open-source tool for network discovery and security auditing.

Common commands:
- `nmap -sS [target]` - TCP SYN scan (stealth scan)
- `nmap -sV [target]` - Version detection
- `nmap -O [target]` - OS detection
- `nmap -A [target]` - Aggressive scan (OS, version, scripts)
- `nmap -p- [target]` - Scan all 65535 ports

Ethical usage:
- Only scan networks you own or have permission to test
- Be aware of legal implications
- Use responsibly for security assessments

Try our Nmap simulator in the Security Tools section!";

const WIRESHARK: &str = "Wireshark is a network protocol analyzer that captures and displays network packets in real-time.

Key features:
- Capture live packet data
- Filter packets by protocol, source, destination
- Decrypt encrypted traffic (with keys)
- Follow TCP streams
- Analyze network performance

Common use cases:
- Network troubleshooting
- Security analysis
- Protocol development
- Education and learning

Filters:
- `http` - Show only HTTP traffic
- `ip.addr == 192.168.1.1` - Filter by IP
- `tcp.port == 80` - Filter by port

Try our Wireshark simulator in the Security Tools section!";

const CSRF: &str = "CSRF (Cross-Site Request Forgery) tricks users into executing unwanted actions on a web application where they're authenticated.

How it works:
1. User logs into legitimate site
2. Attacker tricks user into visiting malicious site
3. Malicious site sends forged request to legitimate site
4. Request executes with user's credentials

Prevention:
- Use CSRF tokens (random values per session)
- Validate Origin/Referer headers
- Use SameSite cookie attribute
- Require re-authentication for sensitive actions
- Use custom request headers

Explore our CSRF lab to understand this vulnerability better!";

const ENCRYPTION: &str = "Encryption is the process of encoding information so only authorized parties can access it.

Common algorithms:
- **AES-256**: Symmetric encryption, very secure
- **RSA**: Asymmetric encryption, used for key exchange
- **ChaCha20**: Modern stream cipher

Key concepts:
- **Symmetric**: Same key for encryption and decryption
- **Asymmetric**: Public key encrypts, private key decrypts
- **Hashing**: One-way function (SHA-256, bcrypt)

Best practices:
- Use strong, random keys
- Never store keys in code
- Use established libraries
- Keep software updated

Try our Encryption/Decryption tools to practice!";

const PASSWORDS: &str = "Strong passwords are essential for security!

Characteristics of strong passwords:
- At least 12-16 characters long
- Mix of uppercase and lowercase
- Include numbers and special characters
- Avoid dictionary words
- Unique for each account

Best practices:
- Use a password manager
- Enable 2FA/MFA when available
- Never share passwords
- Change passwords if compromised
- Avoid password reuse

Common attacks:
- Brute force: Trying all combinations
- Dictionary: Using common words
- Credential stuffing: Using leaked passwords

Use our Password Analyzer tool to test strength!";

const AUTHENTICATION: &str = "Authentication vulnerabilities allow attackers to bypass or compromise the login system.

Common vulnerabilities:
1. **SQL Injection in login forms**
2. **Weak password policies**
3. **Session fixation**
4. **Broken session management**
5. **Insecure password reset**
6. **Missing rate limiting**

Secure authentication:
- Hash passwords with bcrypt/Argon2
- Implement account lockout
- Use secure session management
- Enable MFA
- Validate on server-side
- Use HTTPS only

Try our Authentication Bypass lab!";

const ACCESS_CONTROL: &str = "Access Control ensures users can only access resources they're authorized for.

Types of vulnerabilities:
1. **Horizontal privilege escalation**: Access other users' data
2. **Vertical privilege escalation**: Access admin functions
3. **IDOR**: Insecure Direct Object Reference

Prevention:
- Implement role-based access control (RBAC)
- Verify permissions server-side
- Use indirect references
- Deny by default
- Test with different user roles

Principle of least privilege:
- Users should have minimum necessary access
- Regularly review permissions
- Remove access when no longer needed

Explore our Broken Access Control lab!";

const FALLBACK: &str = "That's an interesting question! I can help you with:

- SQL Injection attacks and prevention
- XSS (Cross-Site Scripting) vulnerabilities
- Authentication and access control
- Network tools like Nmap and Wireshark
- Encryption and cryptography
- Password security
- CSRF attacks
- And many other cybersecurity topics!

Feel free to ask about any specific vulnerability or tool, or explore our interactive labs!";

/// The general assistant's topics, most specific first.
pub fn table() -> RuleTable {
    RuleTable::builder()
        .rule("sql-injection", ["sql injection", "sqli"], SQL_INJECTION)
        .rule("xss", ["xss", "cross-site scripting"], XSS)
        .rule("nmap", ["nmap", "port scan"], NMAP)
        .rule("wireshark", ["wireshark", "packet"], WIRESHARK)
        .rule("csrf", ["csrf"], CSRF)
        .rule("encryption", ["encryption", "decrypt"], ENCRYPTION)
        .rule("passwords", ["password", "strong password"], PASSWORDS)
        .rule("authentication", ["authentication", "auth bypass"], AUTHENTICATION)
        .rule("access-control", ["access control", "privilege"], ACCESS_CONTROL)
        .fallback("general", FALLBACK)
}

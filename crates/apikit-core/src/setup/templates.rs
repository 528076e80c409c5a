//! Built-in component templates
//!
//! Rendered with `name` (capitalized component name), `scheme` and
//! `package`.

/// `<Name>Component.java`
pub const COMPONENT: &str = r"package {{package}};

import org.apache.camel.CamelContext;
import org.apache.camel.Endpoint;
import org.apache.camel.util.component.AbstractApiComponent;

import {{package}}.internal.{{name}}ApiCollection;
import {{package}}.internal.{{name}}ApiName;

/**
 * Represents the component that manages {@link {{name}}Endpoint}.
 */
public class {{name}}Component extends AbstractApiComponent<{{name}}ApiName, {{name}}Configuration, {{name}}ApiCollection> {

    public {{name}}Component() {
        super({{name}}Endpoint.class, {{name}}ApiName.class, {{name}}ApiCollection.getCollection());
    }

    public {{name}}Component(CamelContext context) {
        super(context, {{name}}Endpoint.class, {{name}}ApiName.class, {{name}}ApiCollection.getCollection());
    }

    @Override
    protected {{name}}ApiName getApiName(String apiNameStr) throws IllegalArgumentException {
        return {{name}}ApiName.fromValue(apiNameStr);
    }

    @Override
    protected Endpoint createEndpoint(String uri, String methodName, {{name}}ApiName apiName,
                                      {{name}}Configuration endpointConfiguration) {
        {{name}}Endpoint endpoint = new {{name}}Endpoint(uri, this, apiName, methodName, endpointConfiguration);
        endpoint.setName(methodName);
        return endpoint;
    }

    /**
     * To use the shared configuration
     */
    @Override
    public void setConfiguration({{name}}Configuration configuration) {
        super.setConfiguration(configuration);
    }
}
";

/// `<Name>Configuration.java`
pub const CONFIGURATION: &str = r#"package {{package}};

import org.apache.camel.spi.Metadata;
import org.apache.camel.spi.UriParam;
import org.apache.camel.spi.UriParams;
import org.apache.camel.spi.UriPath;

/**
 * Component configuration for {{name}} component.
 */
@UriParams
public class {{name}}Configuration {

    @UriPath
    @Metadata(required = "true")
    private String apiName;

    @UriPath
    @Metadata(required = "true")
    private String methodName;

    public String getApiName() {
        return apiName;
    }

    /**
     * What kind of operation to perform
     */
    public void setApiName(String apiName) {
        this.apiName = apiName;
    }

    public String getMethodName() {
        return methodName;
    }

    /**
     * What sub operation to use for the selected operation
     */
    public void setMethodName(String methodName) {
        this.methodName = methodName;
    }
}
"#;

/// `<Name>Consumer.java`
pub const CONSUMER: &str = r"package {{package}};

import org.apache.camel.Processor;
import org.apache.camel.util.component.AbstractApiConsumer;

import {{package}}.internal.{{name}}ApiName;

/**
 * The {{name}} consumer.
 */
public class {{name}}Consumer extends AbstractApiConsumer<{{name}}ApiName, {{name}}Configuration> {

    public {{name}}Consumer({{name}}Endpoint endpoint, Processor processor) {
        super(endpoint, processor);
    }
}
";

/// `<Name>Endpoint.java`
pub const ENDPOINT: &str = r#"package {{package}};

import java.util.Map;

import org.apache.camel.Consumer;
import org.apache.camel.Processor;
import org.apache.camel.Producer;
import org.apache.camel.spi.UriEndpoint;
import org.apache.camel.spi.UriParam;
import org.apache.camel.util.component.AbstractApiEndpoint;
import org.apache.camel.util.component.ApiMethod;
import org.apache.camel.util.component.ApiMethodPropertiesHelper;

import {{package}}.internal.{{name}}ApiCollection;
import {{package}}.internal.{{name}}ApiName;
import {{package}}.internal.{{name}}Constants;
import {{package}}.internal.{{name}}PropertiesHelper;

/**
 * Represents a {{name}} endpoint.
 */
@UriEndpoint(scheme = "{{scheme}}", title = "{{name}}", syntax = "{{scheme}}:name", consumerClass = {{name}}Consumer.class, label = "custom")
public class {{name}}Endpoint extends AbstractApiEndpoint<{{name}}ApiName, {{name}}Configuration> {

    @UriParam
    private final {{name}}Configuration configuration;

    private Object apiProxy;

    public {{name}}Endpoint(String uri, {{name}}Component component,
                         {{name}}ApiName apiName, String methodName, {{name}}Configuration endpointConfiguration) {
        super(uri, component, apiName, methodName, {{name}}ApiCollection.getCollection().getHelper(apiName), endpointConfiguration);
        this.configuration = endpointConfiguration;
    }

    public Producer createProducer() throws Exception {
        return new {{name}}Producer(this);
    }

    public Consumer createConsumer(Processor processor) throws Exception {
        // make sure inBody is not set for consumers
        if (inBody != null) {
            throw new IllegalArgumentException("Option inBody is not supported for consumer endpoint");
        }
        final {{name}}Consumer consumer = new {{name}}Consumer(this, processor);
        // also set consumer.* properties
        configureConsumer(consumer);
        return consumer;
    }

    @Override
    protected ApiMethodPropertiesHelper<{{name}}Configuration> getPropertiesHelper() {
        return {{name}}PropertiesHelper.getHelper();
    }

    protected String getThreadProfileName() {
        return {{name}}Constants.THREAD_PROFILE_NAME;
    }

    @Override
    protected void afterConfigureProperties() {
        // TODO create API proxy, set connection properties, etc.
        switch (apiName) {
            default:
                throw new IllegalArgumentException("Invalid API name " + apiName);
        }
    }

    @Override
    public Object getApiProxy(ApiMethod method, Map<String, Object> args) {
        return apiProxy;
    }
}
"#;

/// `<Name>Producer.java`
pub const PRODUCER: &str = r"package {{package}};

import org.apache.camel.util.component.AbstractApiProducer;

import {{package}}.internal.{{name}}ApiName;
import {{package}}.internal.{{name}}PropertiesHelper;

/**
 * The {{name}} producer.
 */
public class {{name}}Producer extends AbstractApiProducer<{{name}}ApiName, {{name}}Configuration> {

    public {{name}}Producer({{name}}Endpoint endpoint) {
        super(endpoint, {{name}}PropertiesHelper.getHelper());
    }
}
";

/// `internal/<Name>Constants.java`
pub const CONSTANTS: &str = r#"package {{package}}.internal;

/**
 * Constants for {{name}} component.
 */
public interface {{name}}Constants {

    // suffix for parameters when passed as exchange header properties
    String PROPERTY_PREFIX = "Camel{{name}}.";

    // thread profile name for this component
    String THREAD_PROFILE_NAME = "Camel{{name}}";
}
"#;

/// `internal/<Name>PropertiesHelper.java`
pub const PROPERTIES_HELPER: &str = r"package {{package}}.internal;

import org.apache.camel.util.component.ApiMethodPropertiesHelper;

import {{package}}.{{name}}Configuration;

/**
 * Singleton {@link ApiMethodPropertiesHelper} for {{name}} component.
 */
public final class {{name}}PropertiesHelper extends ApiMethodPropertiesHelper<{{name}}Configuration> {

    private static {{name}}PropertiesHelper helper;

    private {{name}}PropertiesHelper() {
        super({{name}}Configuration.class, {{name}}Constants.PROPERTY_PREFIX);
    }

    public static synchronized {{name}}PropertiesHelper getHelper() {
        if (helper == null) {
            helper = new {{name}}PropertiesHelper();
        }
        return helper;
    }
}
";

/// Test `Abstract<Name>TestSupport.java`
pub const TEST_SUPPORT: &str = r#"package {{package}};

import java.io.IOException;
import java.util.HashMap;
import java.util.Map;
import java.util.Properties;

import org.apache.camel.CamelContext;
import org.apache.camel.CamelExecutionException;
import org.apache.camel.test.junit4.CamelTestSupport;
import org.apache.camel.util.IntrospectionSupport;

/**
 * Abstract base class for {{name}} Integration tests generated by Camel API component maven plugin.
 */
public class Abstract{{name}}TestSupport extends CamelTestSupport {

    private static final String TEST_OPTIONS_PROPERTIES = "/test-options.properties";

    @Override
    protected CamelContext createCamelContext() throws Exception {

        final CamelContext context = super.createCamelContext();

        // read {{name}} component configuration from TEST_OPTIONS_PROPERTIES
        final Properties properties = new Properties();
        try {
            properties.load(getClass().getResourceAsStream(TEST_OPTIONS_PROPERTIES));
        } catch (Exception e) {
            throw new IOException(String.format("%s could not be loaded: %s", TEST_OPTIONS_PROPERTIES, e.getMessage()),
                e);
        }

        Map<String, Object> options = new HashMap<String, Object>();
        for (Map.Entry<Object, Object> entry : properties.entrySet()) {
            options.put(entry.getKey().toString(), entry.getValue());
        }

        final {{name}}Configuration configuration = new {{name}}Configuration();
        IntrospectionSupport.setProperties(configuration, options);

        // add {{name}}Component to Camel context
        final {{name}}Component component = new {{name}}Component(context);
        component.setConfiguration(configuration);
        context.addComponent("{{scheme}}", component);

        return context;
    }

    @Override
    public boolean isCreateCamelContextPerClass() {
        // only create the context once for this class
        return true;
    }

    @SuppressWarnings("unchecked")
    protected <T> T requestBodyAndHeaders(String endpointUri, Object body, Map<String, Object> headers)
        throws CamelExecutionException {
        return (T) template().requestBodyAndHeaders(endpointUri, body, headers);
    }

    @SuppressWarnings("unchecked")
    protected <T> T requestBody(String endpoint, Object body) throws CamelExecutionException {
        return (T) template().requestBody(endpoint, body);
    }
}
"#;

/// `META-INF/services/org/apache/camel/component/<scheme>`
pub const COMPONENT_SERVICE: &str = "class={{package}}.{{name}}Component\n";

/// Test `log4j.properties`
pub const LOG4J_PROPERTIES: &str = r"#
# The logging properties used
#
log4j.rootLogger=INFO, out

# uncomment the following line to turn on Camel debugging
#log4j.logger.org.apache.camel=DEBUG

# CONSOLE appender not used by default
log4j.appender.stdout=org.apache.log4j.ConsoleAppender
log4j.appender.stdout.layout=org.apache.log4j.PatternLayout
log4j.appender.stdout.layout.ConversionPattern=[%30.30t] %-30.30c{1} %-5p %m%n
#log4j.appender.stdout.layout.ConversionPattern=%d [%-15.15t] %-5p %-30.30c{1} - %m%n

# File appender
log4j.appender.out=org.apache.log4j.FileAppender
log4j.appender.out.layout=org.apache.log4j.PatternLayout
log4j.appender.out.layout.ConversionPattern=%d [%-15.15t] %-5p %-30.30c{1} - %m%n
log4j.appender.out.file=target/camel-{{scheme}}-test.log
log4j.appender.out.append=true
";

/// Test `test-options.properties`
pub const TEST_OPTIONS: &str = r"#
# {{name}} component test options, set connection properties here
#
";
